use crate::{error::ProvisioningError, provisioner::Provisioner};
use connectors::catalog::FunctionCatalog;
use model::core::identifiers::ContainerRef;
use planner::CompiledQuery;

/// Produces the final query text, provisioning its functions first when it
/// calls any.
pub async fn assemble<C>(
    compiled: CompiledQuery,
    provisioner: &Provisioner<C>,
    container: &ContainerRef,
) -> Result<String, ProvisioningError>
where
    C: FunctionCatalog + ?Sized,
{
    match compiled {
        CompiledQuery::Plain(text) => Ok(text),
        CompiledQuery::WithFunctions { text, requirements } => {
            provisioner.resolve(container, &requirements).await?;
            Ok(text)
        }
    }
}
