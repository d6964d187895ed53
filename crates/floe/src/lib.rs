//! Floe: a dependency kernel for coupled physical simulations.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! Floe sub-crates. A model is a set of swappable [`prelude::Component`]s
//! exchanging named arrays through a shared [`prelude::ArrayStore`]; the
//! [`prelude::Assembler`] wires them up at startup (access control,
//! single-writer checks, topological update ordering) and the
//! [`prelude::Runner`] drives the resulting model over a configured
//! schedule.
//!
//! # Quick start
//!
//! ```rust
//! use floe::prelude::*;
//!
//! /// Supplies a constant 4x4 field.
//! struct Constant {
//!     out: Option<WriteRef>,
//! }
//!
//! impl Component for Constant {
//!     fn name(&self) -> &str { "constant" }
//!     fn supplies(&self) -> Vec<Supply> {
//!         vec![Supply {
//!             id: ArrayId::shared("background"),
//!             tag: DimTag::Horizontal,
//!             shape: Some(shape(&[4, 4])),
//!             sharing: Sharing::Shared,
//!         }]
//!     }
//!     fn requires(&self) -> Vec<Requirement> { vec![] }
//!     fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
//!         store.declare(ArrayId::shared("background"), DimTag::Horizontal, shape(&[4, 4]))?;
//!         self.out = Some(store.bind_write(&ArrayId::shared("background"), "constant")?);
//!         Ok(())
//!     }
//!     fn bind_required(&mut self, _store: &mut ArrayStore) -> Result<(), StoreError> {
//!         Ok(())
//!     }
//!     fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
//!         ctx.store().write(self.out.as_ref().unwrap()).fill(1.5);
//!         Ok(())
//!     }
//! }
//!
//! let config = ConfigStore::new()
//!     .with("model.step", ConfigValue::Real(3600.0))
//!     .with("model.duration", ConfigValue::Real(36_000.0));
//!
//! let mut model = Assembler::new(config.clone())
//!     .with(Box::new(Constant { out: None }))
//!     .assemble()
//!     .unwrap();
//!
//! let schedule = Schedule::from_config(&config).unwrap();
//! let steps = Runner::new(schedule).run(&mut model).unwrap();
//! assert_eq!(steps, 10);
//! assert_eq!(
//!     model.store().snapshot(&ArrayId::shared("background")).unwrap().at(0, 0),
//!     1.5,
//! );
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `floe-core` | Identities, dimension tags, time, configuration |
//! | [`store`] | `floe-store` | The array store and access-tagged references |
//! | [`component`] | `floe-component` | The `Component` trait and declarations |
//! | [`registry`] | `floe-registry` | Configuration-driven module selection |
//! | [`engine`] | `floe-engine` | Assembly, the iterant protocol, the driver loop |
//! | [`components`] | `floe-components` | Reference components and collaborators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identities, dimension tags, time, and configuration (`floe-core`).
pub use floe_core as types;

/// The semantic array store (`floe-store`).
///
/// [`store::ArrayStore`] owns every model array;
/// [`store::ReadRef`] / [`store::WriteRef`] carry the declared access
/// mode in their type.
pub use floe_store as store;

/// The component model (`floe-component`).
///
/// [`component::Component`] is the main extension point; the
/// [`component::Structure`] and [`component::DiagnosticOutput`] traits
/// are the seams to the outside world.
pub use floe_component as component;

/// Configuration-driven module selection (`floe-registry`).
pub use floe_registry as registry;

/// Assembly and iteration (`floe-engine`).
///
/// [`engine::Assembler`] produces a ready [`engine::Model`];
/// [`engine::Runner`] drives it over an [`engine::Schedule`].
pub use floe_engine as engine;

/// Reference components (`floe-components`).
///
/// A minimal ocean/ice pipeline plus the grid and diagnostics
/// collaborators, useful as templates and in tests.
pub use floe_components as components;

/// Common imports for typical Floe usage.
///
/// ```rust
/// use floe::prelude::*;
/// ```
pub mod prelude {
    // Identity and configuration
    pub use floe_core::{
        ArrayId, Category, ConfigError, ConfigStore, ConfigValue, DimTag, TimestepTime,
        UpdateError,
    };

    // Store
    pub use floe_store::{
        shape, Array, ArrayStore, ReadRef, Shape, StoreError, WriteRef,
    };

    // Component model
    pub use floe_component::{
        Access, Component, DiagnosticOutput, GridDims, Request, Requirement, Sharing,
        StepContext, Structure, Supply,
    };

    // Registry
    pub use floe_registry::{ModuleError, ModuleRegistry};

    // Engine
    pub use floe_engine::{
        Assembler, AssemblyError, CancelFlag, IterateError, Iterant, Model, Phase, RunError,
        Runner, Schedule, Sequence,
    };
}
