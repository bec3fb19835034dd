use std::sync::Arc;

use crate::datasets::DataSet;
use crate::errors::DataSetError;
use crate::tracking::TrackingClient;
use crate::GantryResult;

/// Flavor whose models wrap arbitrary inference code and therefore need an
/// explicit workflow choice.
pub const PYFUNC_FLAVOR: &str = "pyfunc";

const ALLOWED_PYFUNC_WORKFLOWS: &[&str] = &["python_model", "loader_module"];
const DEFAULT_ARTIFACT_PATH: &str = "model";

/// Dataset that logs models to and loads models from the tracking backend.
pub struct MlflowModelDataSet {
    client: Arc<dyn TrackingClient>,
    flavor: String,
    run_id: Option<String>,
    artifact_path: String,
    pyfunc_workflow: Option<String>,
}

impl std::fmt::Debug for MlflowModelDataSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlflowModelDataSet")
            .field("flavor", &self.flavor)
            .field("run_id", &self.run_id)
            .field("artifact_path", &self.artifact_path)
            .field("pyfunc_workflow", &self.pyfunc_workflow)
            .finish_non_exhaustive()
    }
}

impl MlflowModelDataSet {
    pub fn new(
        client: Arc<dyn TrackingClient>,
        flavor: impl Into<String>,
        run_id: Option<String>,
        artifact_path: Option<String>,
        pyfunc_workflow: Option<String>,
    ) -> GantryResult<Self> {
        let flavor = flavor.into();
        if flavor.trim().is_empty() {
            return Err(Box::new(DataSetError(
                "model dataset requires a flavor".to_string(),
            )));
        }
        if flavor == PYFUNC_FLAVOR {
            let workflow_allowed = pyfunc_workflow
                .as_deref()
                .map(|workflow| ALLOWED_PYFUNC_WORKFLOWS.contains(&workflow))
                .unwrap_or(false);
            if !workflow_allowed {
                return Err(Box::new(DataSetError(format!(
                    "pyfunc models require pyfunc_workflow set to one of: {}",
                    ALLOWED_PYFUNC_WORKFLOWS.join(", ")
                ))));
            }
        }
        Ok(Self {
            client,
            flavor,
            run_id,
            artifact_path: artifact_path.unwrap_or_else(|| DEFAULT_ARTIFACT_PATH.to_string()),
            pyfunc_workflow,
        })
    }

    /// Uri of the model, addressed by the explicit run id or the active run.
    pub fn model_uri(&self) -> GantryResult<String> {
        let run_id = self
            .run_id
            .clone()
            .or_else(|| self.client.active_run_id())
            .ok_or_else(|| {
                Box::new(DataSetError(
                    "model uri requires an explicit run_id or an active run".to_string(),
                )) as Box<dyn std::error::Error + Send + Sync>
            })?;
        Ok(format!("runs:/{}/{}", run_id, self.artifact_path))
    }
}

impl DataSet for MlflowModelDataSet {
    fn load(&self) -> GantryResult<Vec<u8>> {
        self.client.load_model(&self.model_uri()?)
    }

    fn save(&self, data: &[u8]) -> GantryResult<()> {
        // Logging into one run while another is active would scatter the
        // artifacts; refuse instead.
        if let (Some(run_id), Some(active)) = (self.run_id.as_deref(), self.client.active_run_id())
        {
            if run_id != active {
                return Err(Box::new(DataSetError(format!(
                    "run_id mismatch: dataset is bound to run {run_id} but run {active} is active"
                ))));
            }
        }
        self.client
            .log_model(self.run_id.as_deref(), &self.artifact_path, &self.flavor, data)
    }

    fn exists(&self) -> GantryResult<bool> {
        match self.model_uri() {
            Ok(uri) => self.client.model_exists(&uri),
            Err(_) => Ok(false),
        }
    }

    fn describe(&self) -> String {
        match &self.pyfunc_workflow {
            Some(workflow) => format!(
                "mlflow model dataset (flavor={}, artifact_path={}, pyfunc_workflow={})",
                self.flavor, self.artifact_path, workflow
            ),
            None => format!(
                "mlflow model dataset (flavor={}, artifact_path={})",
                self.flavor, self.artifact_path
            ),
        }
    }
}
