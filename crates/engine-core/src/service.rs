use crate::{
    assembler::assemble, error::QueryError, provisioner::Provisioner, settings::ProvisionSettings,
};
use connectors::catalog::FunctionCatalog;
use model::{core::identifiers::ContainerRef, filter::Filter};
use planner::{CompiledQuery, Compiler, error::CompileError};
use std::sync::Arc;

/// Compiles filters and provisions what they need, in one call.
pub struct QueryService<C: ?Sized> {
    compiler: Compiler,
    provisioner: Arc<Provisioner<C>>,
}

impl<C: ?Sized> Clone for QueryService<C> {
    fn clone(&self) -> Self {
        Self {
            compiler: self.compiler.clone(),
            provisioner: Arc::clone(&self.provisioner),
        }
    }
}

impl<C: FunctionCatalog + ?Sized> QueryService<C> {
    pub fn new(compiler: Compiler, provisioner: Arc<Provisioner<C>>) -> Self {
        Self {
            compiler,
            provisioner,
        }
    }

    /// Default compiler and a provisioner with a fresh cache.
    pub fn with_catalog(catalog: Arc<C>, settings: ProvisionSettings) -> Self {
        let provisioner = Provisioner::new(catalog, Arc::default(), settings);
        Self::new(Compiler::default(), Arc::new(provisioner))
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn provisioner(&self) -> &Arc<Provisioner<C>> {
        &self.provisioner
    }

    pub fn compile(&self, filter: &Filter) -> Result<CompiledQuery, CompileError> {
        self.compiler.compile(filter)
    }

    /// Query text ready to run against `container`.
    pub async fn prepare(&self, filter: &Filter, container: &ContainerRef) -> Result<String, QueryError> {
        let compiled = self.compiler.compile(filter)?;
        Ok(assemble(compiled, &self.provisioner, container).await?)
    }

    pub async fn prepare_json(
        &self,
        filter: serde_json::Value,
        container: &ContainerRef,
    ) -> Result<String, QueryError> {
        let filter = Filter::try_from(filter)?;
        self.prepare(&filter, container).await
    }
}
