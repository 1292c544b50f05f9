use ndarray::ArrayView2;

use crate::{PairedInputs, Real};

/// The inputs a physics-informed operator network was fed, as seen by the residual
/// and condition functions.
pub trait OperatorModel {
    /// The coordinates fed to the trunk net.
    fn trunk_input(&self) -> ArrayView2<'_, Real>;

    /// The paired values `v(x)` fed alongside the coordinates.
    fn aux_input(&self) -> ArrayView2<'_, Real>;
}

impl OperatorModel for PairedInputs {
    fn trunk_input(&self) -> ArrayView2<'_, Real> {
        self.x()
    }

    fn aux_input(&self) -> ArrayView2<'_, Real> {
        self.vx()
    }
}
