pub mod scale;
pub mod validate;

pub use scale::ScaleReconciler;
pub use validate::Validator;

use crate::core::model::{BodySpec, HeaderSpec, NormalizedBody, ReconciledScale, Validation};

/// Everything derived from comparing one header against one body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub scale: ReconciledScale,
    pub normalized: NormalizedBody,
    pub validation: Validation,
}

pub trait ReconcileEngine {
    fn reconcile(&self, header: &HeaderSpec, body: &BodySpec) -> Reconciliation;
}

#[derive(Debug, Default)]
pub struct SimpleReconcileEngine {
    scale: ScaleReconciler,
    validator: Validator,
}

impl SimpleReconcileEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReconcileEngine for SimpleReconcileEngine {
    fn reconcile(&self, header: &HeaderSpec, body: &BodySpec) -> Reconciliation {
        let scale = self.scale.reconcile(header, body);
        let normalized = self.validator.normalize(body, &scale);
        let validation = self.validator.validate(header, body, &normalized);
        Reconciliation {
            scale,
            normalized,
            validation,
        }
    }
}
