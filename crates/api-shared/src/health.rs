use crate::wire::HealthRes;

/// Health service shared by the API binaries.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive.
    ///
    /// Liveness only: the store and the enrichment service are not checked.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Song library is alive".into(),
        }
    }
}
