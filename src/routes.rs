//! Route table construction.
//!
//! Walks a descriptor set file by file and service by service, resolving every
//! method in declaration order. One [`EmissionCounter`] spans the whole run.

use crate::binding::{
    resolve_method, EmissionCounter, PackageRegistry, ResolveContext, ResolveError, RouteBinding,
};
use crate::descriptor::{DescriptorSet, FileDescriptor, ServiceDescriptor};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Resolved routes of one service plus the metadata the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRoutes {
    /// `Greeter`
    pub name: String,
    /// `helloworld.Greeter`
    pub full_name: String,
    /// `api/helloworld/helloworld.proto`
    pub file_path: String,
    pub deprecated: bool,
    pub bindings: Vec<RouteBinding>,
}

impl ServiceRoutes {
    /// `GreeterHTTPServer`
    #[must_use]
    pub fn interface_name(&self) -> String {
        format!("{}HTTPServer", self.name)
    }

    /// One binding per distinct method name, sorted by name.
    #[must_use]
    pub fn method_set(&self) -> Vec<&RouteBinding> {
        let mut set: BTreeMap<&str, &RouteBinding> = BTreeMap::new();
        for binding in &self.bindings {
            set.entry(binding.method_name.as_str()).or_insert(binding);
        }
        set.into_values().collect()
    }
}

/// A package the generated file has to import.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PackageImport {
    pub alias: String,
    pub path: String,
}

/// Routes of every service declared in one schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRoutes {
    pub path: String,
    pub package: String,
    pub import_path: String,
    pub imports: Vec<PackageImport>,
    pub services: Vec<ServiceRoutes>,
}

impl FileRoutes {
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.services.iter().map(|s| s.bindings.len()).sum()
    }
}

/// Builds route tables while owning the run-wide emission counter.
#[derive(Debug)]
pub struct RouteTableBuilder<'a> {
    registry: &'a PackageRegistry,
    counter: EmissionCounter,
}

impl<'a> RouteTableBuilder<'a> {
    pub fn new(registry: &'a PackageRegistry) -> Self {
        RouteTableBuilder {
            registry,
            counter: EmissionCounter::new(),
        }
    }

    /// Resolve every method of `service` in declaration order.
    pub fn build_service(
        &mut self,
        file: &FileDescriptor,
        service: &ServiceDescriptor,
    ) -> Result<ServiceRoutes, ResolveError> {
        let ctx = ResolveContext {
            registry: self.registry,
            file,
            default_auth: service.auth.as_ref(),
        };
        let mut bindings = Vec::with_capacity(service.methods.len());
        for method in &service.methods {
            bindings.extend(resolve_method(method, &ctx, &mut self.counter)?);
        }
        let routes = ServiceRoutes {
            name: service.name.clone(),
            full_name: service.full_name(file),
            file_path: file.path.clone(),
            deprecated: service.deprecated,
            bindings,
        };
        info!(
            service = %routes.full_name,
            methods = service.methods.len(),
            bindings = routes.bindings.len(),
            "built route table"
        );
        Ok(routes)
    }

    /// Routes for one file, or `None` when it declares no services.
    pub fn build_file(
        &mut self,
        file: &FileDescriptor,
    ) -> Result<Option<FileRoutes>, ResolveError> {
        if file.services.is_empty() {
            return Ok(None);
        }
        let services = file
            .services
            .iter()
            .map(|service| self.build_service(file, service))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(FileRoutes {
            path: file.path.clone(),
            package: file.package.clone(),
            import_path: file.import_path.clone(),
            imports: referenced_imports(self.registry, file),
            services,
        }))
    }

    /// Hand the counter back, e.g. to continue numbering in another builder.
    #[must_use]
    pub fn into_counter(self) -> EmissionCounter {
        self.counter
    }
}

/// Packages of payload types that `file` references from elsewhere, sorted by
/// import path.
fn referenced_imports(registry: &PackageRegistry, file: &FileDescriptor) -> Vec<PackageImport> {
    let mut imports: BTreeMap<&str, &str> = BTreeMap::new();
    let types = file
        .services
        .iter()
        .flat_map(|s| &s.methods)
        .flat_map(|m| [&m.input, &m.output]);
    for ty in types {
        let Some(import_path) = ty.import_path.as_deref() else {
            continue;
        };
        if import_path == file.import_path {
            continue;
        }
        if let Some(package) = registry.package_for(import_path) {
            imports.entry(import_path).or_insert(package);
        }
    }
    imports
        .into_iter()
        .map(|(path, alias)| PackageImport {
            alias: alias.to_string(),
            path: path.to_string(),
        })
        .collect()
}

/// Build route tables for every file of the set that declares services.
///
/// # Errors
///
/// Fails on the first type whose declaring package is not part of the set.
pub fn build_route_tables(set: &DescriptorSet) -> Result<Vec<FileRoutes>, ResolveError> {
    let registry = PackageRegistry::from_descriptor_set(set);
    let mut builder = RouteTableBuilder::new(&registry);
    let mut tables = Vec::new();
    for file in &set.files {
        if let Some(routes) = builder.build_file(file)? {
            tables.push(routes);
        }
    }
    Ok(tables)
}
