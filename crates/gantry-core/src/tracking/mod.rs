use crate::GantryResult;

/// Experiment-tracking seam the model datasets are written against. Run
/// lifecycle and artifact transport belong to the tracking backend.
pub trait TrackingClient: Send + Sync {
    fn active_run_id(&self) -> Option<String>;

    /// Logs a serialized model under `artifact_path` of the given run
    /// (the active run when `run_id` is `None`).
    fn log_model(
        &self,
        run_id: Option<&str>,
        artifact_path: &str,
        flavor: &str,
        model: &[u8],
    ) -> GantryResult<()>;

    /// Loads a serialized model addressed by a `runs:/<run_id>/<path>` uri.
    fn load_model(&self, model_uri: &str) -> GantryResult<Vec<u8>>;

    fn model_exists(&self, model_uri: &str) -> GantryResult<bool>;
}
