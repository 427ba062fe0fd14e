use serde::{Deserialize, Serialize};

/// Patient identity handed over from the registration/search step.
/// The wizard never creates or mutates this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientIdentity {
    pub patient_id: String,
    pub patient_name: String,
    /// Medical Record Number assigned by the hospital. Absent until the
    /// patient has visited in person.
    #[serde(default)]
    pub mrn: Option<String>,
}

impl PatientIdentity {
    pub fn new(
        patient_id: impl Into<String>,
        patient_name: impl Into<String>,
        mrn: Option<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            patient_name: patient_name.into(),
            mrn,
        }
    }
}
