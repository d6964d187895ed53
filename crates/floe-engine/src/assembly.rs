//! The one-time startup phase: configure, route requests, register,
//! order, bind.
//!
//! Assembly either completes fully or fails with a diagnostic naming the
//! offending component and array; no partially wired [`Model`] is ever
//! produced.

use std::error::Error;
use std::fmt;

use floe_component::{Component, Request, Sharing};
use floe_core::{ArrayId, ConfigError, ConfigStore, DimTag};
use floe_registry::ModuleError;
use floe_store::{ArrayStore, Shape, StoreError};
use indexmap::IndexMap;

use crate::model::Model;

// ── Errors ──────────────────────────────────────────────────────────

/// A failure during model assembly.
#[derive(Clone, Debug, PartialEq)]
pub enum AssemblyError {
    /// A component rejected its configuration.
    Config {
        /// Name of the failing component.
        component: String,
        /// The underlying configuration error.
        source: ConfigError,
    },
    /// A module registry lookup or construction failed.
    Module(ModuleError),
    /// A store operation failed while registering or binding.
    Store {
        /// Name of the component whose operation failed.
        component: String,
        /// The underlying store error.
        source: StoreError,
    },
    /// The dependency graph contains a cycle.
    DependencyCycle {
        /// Components participating in the cycle, in declaration order.
        names: Vec<String>,
    },
    /// A requested array was never declared with the requested layout.
    UnsatisfiedRequest {
        /// Identity that was requested.
        id: ArrayId,
        /// Name of the requesting component.
        requester: String,
    },
    /// A required array was still undeclared after the binding retry
    /// pass.
    UnresolvedArray {
        /// Identity that could not be resolved.
        id: ArrayId,
        /// Name of the component whose bind failed.
        component: String,
    },
    /// Assembly was attempted with no components.
    NoComponents,
    /// Two components were added under the same name.
    DuplicateComponent {
        /// The colliding name.
        name: String,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { component, source } => {
                write!(f, "configuring component '{component}': {source}")
            }
            Self::Module(source) => write!(f, "module registry: {source}"),
            Self::Store { component, source } => {
                write!(f, "component '{component}': {source}")
            }
            Self::DependencyCycle { names } => {
                write!(f, "dependency cycle among components: {}", names.join(", "))
            }
            Self::UnsatisfiedRequest { id, requester } => {
                write!(f, "request for {id} by '{requester}' was not supplied")
            }
            Self::UnresolvedArray { id, component } => {
                write!(f, "required array {id} of '{component}' was never declared")
            }
            Self::NoComponents => write!(f, "cannot assemble a model with no components"),
            Self::DuplicateComponent { name } => {
                write!(f, "component name '{name}' added twice")
            }
        }
    }
}

impl Error for AssemblyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config { source, .. } => Some(source),
            Self::Module(source) => Some(source),
            Self::Store { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ModuleError> for AssemblyError {
    fn from(source: ModuleError) -> Self {
        Self::Module(source)
    }
}

// ── Assembler ───────────────────────────────────────────────────────

/// Builder for a [`Model`].
///
/// Components are added in declaration order; [`assemble`](Self::assemble)
/// runs the full startup protocol and reorders them topologically so
/// that every supplier updates strictly before its requesters.
///
/// Arrays produced outside the component set (boundary forcing, restart
/// state) are declared up front with
/// [`declare_external`](Self::declare_external); components bind to them
/// like any other supply, with no writer-of-record.
pub struct Assembler {
    config: ConfigStore,
    components: Vec<Box<dyn Component>>,
    external: Vec<(ArrayId, DimTag, Shape)>,
}

impl Assembler {
    /// Create an assembler over a configuration store.
    pub fn new(config: ConfigStore) -> Self {
        Self {
            config,
            components: Vec::new(),
            external: Vec::new(),
        }
    }

    /// Add a component. Order of addition is only a tie-break; update
    /// order is decided by the dependency graph.
    pub fn add(&mut self, component: Box<dyn Component>) {
        self.components.push(component);
    }

    /// Chainable [`add`](Self::add).
    pub fn with(mut self, component: Box<dyn Component>) -> Self {
        self.add(component);
        self
    }

    /// Declare an array that is filled from outside the component set.
    pub fn declare_external(&mut self, id: ArrayId, tag: DimTag, shape: Shape) {
        self.external.push((id, tag, shape));
    }

    /// Run the startup protocol and produce a ready [`Model`].
    pub fn assemble(mut self) -> Result<Model, AssemblyError> {
        if self.components.is_empty() {
            return Err(AssemblyError::NoComponents);
        }
        self.check_unique_names()?;

        // Configure every component before anything touches the store.
        for component in &mut self.components {
            let name = component.name().to_string();
            component
                .configure(&self.config)
                .map_err(|source| AssemblyError::Config {
                    component: name,
                    source,
                })?;
        }

        // Route requests to every component ahead of registration, so
        // request-and-supply suppliers know what to declare.
        let requests = self.collect_requests();
        for component in &mut self.components {
            component.respond(&requests);
        }

        let mut store = ArrayStore::new();
        for (id, tag, shape) in &self.external {
            store
                .declare(id.clone(), *tag, shape.clone())
                .map_err(|source| AssemblyError::Store {
                    component: "<external>".to_string(),
                    source,
                })?;
        }

        // Two suppliers of one identity is a conflict even before any
        // reference binds; catch it from the declarations.
        let mut supplier_of: IndexMap<ArrayId, String> = IndexMap::new();
        for component in &self.components {
            let name = component.name().to_string();
            for supply in component.supplies() {
                if let Some(first) = supplier_of.get(&supply.id) {
                    return Err(AssemblyError::Store {
                        component: name.clone(),
                        source: StoreError::WriteConflict {
                            id: supply.id,
                            first_writer: first.clone(),
                            second_writer: name,
                        },
                    });
                }
                supplier_of.insert(supply.id, name.clone());
            }
        }

        for component in &mut self.components {
            let name = component.name().to_string();
            component
                .register_supplied(&mut store)
                .map_err(|source| AssemblyError::Store {
                    component: name,
                    source,
                })?;
        }

        // Install SemiShared access lists once everything is declared.
        for component in &self.components {
            let name = component.name().to_string();
            for supply in component.supplies() {
                if let Sharing::SemiShared { readers } = supply.sharing {
                    store
                        .restrict(&supply.id, readers)
                        .map_err(|source| AssemblyError::Store {
                            component: name.clone(),
                            source,
                        })?;
                }
            }
        }

        // Every request must have been answered with the layout it asked
        // for.
        for request in &requests {
            match store.layout_of(&request.id) {
                Some((tag, shape)) if tag == request.tag && shape == request.shape => {}
                _ => {
                    return Err(AssemblyError::UnsatisfiedRequest {
                        id: request.id.clone(),
                        requester: request.requester.clone(),
                    });
                }
            }
        }

        let order = self.update_order(&supplier_of)?;
        self.bind_in_order(&mut store, &order)?;

        // Permute into update order.
        let mut slots: Vec<Option<Box<dyn Component>>> =
            self.components.into_iter().map(Some).collect();
        let components = order
            .iter()
            .map(|&i| slots[i].take().expect("topological order is a permutation"))
            .collect();
        Ok(Model::new(components, store))
    }

    fn check_unique_names(&self) -> Result<(), AssemblyError> {
        let mut seen = Vec::new();
        for component in &self.components {
            let name = component.name();
            if seen.contains(&name) {
                return Err(AssemblyError::DuplicateComponent {
                    name: name.to_string(),
                });
            }
            seen.push(name);
        }
        Ok(())
    }

    fn collect_requests(&self) -> Vec<Request> {
        let mut requests = Vec::new();
        for component in &self.components {
            for requirement in component.requires() {
                if let Some((tag, shape)) = requirement.request {
                    requests.push(Request {
                        id: requirement.id,
                        tag,
                        shape,
                        requester: component.name().to_string(),
                    });
                }
            }
        }
        requests
    }

    /// Kahn's algorithm over the supplier→requester graph.
    ///
    /// Supply-and-wait arrays invert their edges, so their requesters
    /// update first and observe the previous step's value. Ties are
    /// broken by declaration order, which makes the schedule
    /// deterministic across identical assemblies.
    fn update_order(
        &self,
        supplier_of: &IndexMap<ArrayId, String>,
    ) -> Result<Vec<usize>, AssemblyError> {
        let n = self.components.len();
        let index_by_name: IndexMap<&str, usize> = self
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name(), i))
            .collect();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (requester, component) in self.components.iter().enumerate() {
            for requirement in component.requires() {
                let Some(supplier_name) = supplier_of.get(&requirement.id) else {
                    // External or undeclared; binding decides later.
                    continue;
                };
                let supplier = index_by_name[supplier_name.as_str()];
                if supplier == requester {
                    continue;
                }
                let wait = self.is_supply_and_wait(&requirement.id);
                let edge = if wait {
                    (requester, supplier)
                } else {
                    (supplier, requester)
                };
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }

        let mut indegree = vec![0usize; n];
        for &(_, to) in &edges {
            indegree[to] += 1;
        }
        let mut order = Vec::with_capacity(n);
        let mut placed = vec![false; n];
        while order.len() < n {
            // Smallest declaration index among ready components.
            let Some(next) = (0..n).find(|&i| !placed[i] && indegree[i] == 0) else {
                let names = (0..n)
                    .filter(|&i| !placed[i])
                    .map(|i| self.components[i].name().to_string())
                    .collect();
                return Err(AssemblyError::DependencyCycle { names });
            };
            placed[next] = true;
            order.push(next);
            for &(from, to) in &edges {
                if from == next {
                    indegree[to] -= 1;
                }
            }
        }
        Ok(order)
    }

    fn is_supply_and_wait(&self, id: &ArrayId) -> bool {
        self.components
            .iter()
            .flat_map(|c| c.supplies())
            .any(|s| s.id == *id && s.sharing == Sharing::SupplyAndWait)
    }

    /// Bind every component's requirements, with one retry pass.
    ///
    /// A first-pass `UnknownArray` may simply mean the supplier appears
    /// later in the bind sequence than the declaration pass visited it;
    /// one full retry makes binding independent of declaration order.
    /// Any other store error is immediately fatal.
    fn bind_in_order(
        &mut self,
        store: &mut ArrayStore,
        order: &[usize],
    ) -> Result<(), AssemblyError> {
        let mut deferred: Vec<usize> = Vec::new();
        for &i in order {
            let name = self.components[i].name().to_string();
            match self.components[i].bind_required(store) {
                Ok(()) => {}
                Err(StoreError::UnknownArray { .. }) => deferred.push(i),
                Err(source) => {
                    return Err(AssemblyError::Store {
                        component: name,
                        source,
                    })
                }
            }
        }
        for i in deferred {
            let name = self.components[i].name().to_string();
            match self.components[i].bind_required(store) {
                Ok(()) => {}
                Err(StoreError::UnknownArray { id }) => {
                    return Err(AssemblyError::UnresolvedArray {
                        id,
                        component: name,
                    })
                }
                Err(source) => {
                    return Err(AssemblyError::Store {
                        component: name,
                        source,
                    })
                }
            }
        }
        Ok(())
    }
}
