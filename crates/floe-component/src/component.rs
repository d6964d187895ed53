//! The [`Component`] trait.

use floe_core::{ConfigError, ConfigStore, UpdateError};
use floe_store::{ArrayStore, StoreError};

use crate::context::StepContext;
use crate::decl::{Request, Requirement, Supply};

/// A swappable unit of simulation logic.
///
/// # Contract
///
/// - `supplies()` and `requires()` are queried once at assembly, not per
///   step, and must be stable for the life of the component.
/// - `update()` is a pure function of the component's bound inputs: with
///   identical configuration and identical input arrays it produces
///   bit-identical outputs. It writes only to its declared outputs, must
///   not block, and must not allocate new arrays.
/// - Components are never copied; identity matters. The assembler owns
///   them as `Box<dyn Component>` for the life of the model.
///
/// # Lifecycle
///
/// The assembler drives each phase exactly once, in this order:
/// `configure` → `respond` → `register_supplied` → `bind_required`
/// (in dependency order, with one retry pass for declaration-order
/// independence), then `update` once per timestep.
///
/// # Example
///
/// ```
/// use floe_component::{Component, Requirement, Sharing, StepContext, Supply};
/// use floe_core::{ArrayId, DimTag, UpdateError};
/// use floe_store::{shape, ArrayStore, StoreError, WriteRef};
///
/// /// Supplies a constant-valued field.
/// struct ConstantField {
///     out: Option<WriteRef>,
/// }
///
/// impl Component for ConstantField {
///     fn name(&self) -> &str { "constant_field" }
///
///     fn supplies(&self) -> Vec<Supply> {
///         vec![Supply {
///             id: ArrayId::shared("background"),
///             tag: DimTag::Horizontal,
///             shape: Some(shape(&[4, 4])),
///             sharing: Sharing::Shared,
///         }]
///     }
///
///     fn requires(&self) -> Vec<Requirement> { vec![] }
///
///     fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
///         store.declare(ArrayId::shared("background"), DimTag::Horizontal, shape(&[4, 4]))?;
///         self.out = Some(store.bind_write(&ArrayId::shared("background"), self.name())?);
///         Ok(())
///     }
///
///     fn bind_required(&mut self, _store: &mut ArrayStore) -> Result<(), StoreError> {
///         Ok(())
///     }
///
///     fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
///         let out = self.out.as_ref().expect("bound at assembly");
///         ctx.store().write(out).fill(1.5);
///         Ok(())
///     }
/// }
/// ```
pub trait Component {
    /// Component name: used in diagnostics, write-conflict reports, and
    /// SemiShared access lists.
    fn name(&self) -> &str;

    /// Pull parameters from the configuration store.
    ///
    /// Invoked once by the assembler after construction; a missing or
    /// out-of-range key aborts assembly.
    fn configure(&mut self, _config: &ConfigStore) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Arrays this component supplies.
    fn supplies(&self) -> Vec<Supply>;

    /// Arrays this component requires.
    fn requires(&self) -> Vec<Requirement>;

    /// Observe the requests collected from all components' requirements.
    ///
    /// Called before [`register_supplied`](Component::register_supplied).
    /// Suppliers of request-and-supply arrays record here which of their
    /// arrays were requested, and with what layout, so they can declare
    /// them. The default does nothing.
    fn respond(&mut self, _requests: &[Request]) {}

    /// Declare this component's output arrays in the store, and bind the
    /// write references it holds onto.
    fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError>;

    /// Resolve references to this component's inputs.
    ///
    /// May be retried once by the assembler if a dependency had not yet
    /// declared when first called; implementations must tolerate being
    /// called again after a partial failure.
    fn bind_required(&mut self, store: &mut ArrayStore) -> Result<(), StoreError>;

    /// Perform one timestep's computation.
    fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError>;
}
