use churn_model::{Result, StandardScaler};
use ndarray::{arr1, Array1};
use serde::Deserialize;

/// Length of the encoded feature vector the classifier was trained on.
pub const NUM_FEATURES: usize = 19;

/// Training-set median of monthly charges; the cutoff for the derived
/// high-risk flag.
pub const HIGH_RISK_MONTHLY_CUTOFF: f32 = 70.35;

fn default_no() -> String {
    "No".to_string()
}

/// One submitted customer record, field names matching the HTML form.
///
/// Service fields default to "No" when absent; everything else is required
/// and a missing or unparsable field rejects the request before encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ChurnForm {
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: i32,
    #[serde(rename = "Partner")]
    pub partner: i32,
    #[serde(rename = "Dependents")]
    pub dependents: i32,
    #[serde(rename = "Tenure")]
    pub tenure: f32,
    #[serde(rename = "Contract")]
    pub contract: i32,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: i32,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f32,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f32,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "PhoneService", default = "default_no")]
    pub phone_service: String,
    #[serde(rename = "OnlineSecurity", default = "default_no")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup", default = "default_no")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection", default = "default_no")]
    pub device_protection: String,
    #[serde(rename = "TechSupport", default = "default_no")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV", default = "default_no")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies", default = "default_no")]
    pub streaming_movies: String,
    #[serde(rename = "PaymentMethod", default)]
    pub payment_method: String,
}

impl ChurnForm {
    /// Derived flag: a one-year contract billed above the training-set
    /// median monthly charge.
    pub fn high_risk(&self) -> f32 {
        flag(self.contract == 1 && self.monthly_charges > HIGH_RISK_MONTHLY_CUTOFF)
    }

    /// Number of subscribed services among phone, security, backup,
    /// device protection, tech support and the two streaming options,
    /// counting only explicit "Yes".
    pub fn service_count(&self) -> f32 {
        let values = [
            &self.phone_service,
            &self.online_security,
            &self.online_backup,
            &self.device_protection,
            &self.tech_support,
            &self.streaming_tv,
            &self.streaming_movies,
        ];
        values.iter().filter(|v| v.as_str() == "Yes").count() as f32
    }

    /// Encodes the record into the fixed-order vector the classifier
    /// expects, standardizing the continuous features with `scaler`.
    ///
    /// The scaler runs over `[tenure, MonthlyCharges, TotalCharges,
    /// service_count]`; only the scaled tenure and monthly charges are
    /// substituted back. The scaled total charges and service count never
    /// enter the final vector — the shipped forest was fit on vectors
    /// built exactly this way, so this stays as-is.
    ///
    /// # Errors
    /// Returns `ModelErr` if the scaler was not fit on four features.
    pub fn encode(&self, scaler: &StandardScaler) -> Result<Array1<f32>> {
        // The high-risk flag uses the raw monthly charge, before scaling.
        let high_risk = self.high_risk();

        let mut continuous = arr1(&[
            self.tenure,
            self.monthly_charges,
            self.total_charges,
            self.service_count(),
        ]);
        scaler.transform(&mut continuous)?;
        let tenure = continuous[0];
        let monthly_charges = continuous[1];

        Ok(arr1(&[
            self.senior_citizen as f32,
            self.partner as f32,
            self.dependents as f32,
            tenure,
            self.contract as f32,
            self.paperless_billing as f32,
            monthly_charges,
            high_risk,
            flag(self.internet_service == "Fiber optic"),
            flag(self.internet_service == "No"),
            flag(self.online_security == "No internet service"),
            flag(self.online_security == "Yes"),
            flag(self.online_backup == "No internet service"),
            flag(self.device_protection == "No internet service"),
            flag(self.tech_support == "No internet service"),
            flag(self.tech_support == "Yes"),
            flag(self.streaming_tv == "No internet service"),
            flag(self.streaming_movies == "No internet service"),
            flag(is_manual_payment(&self.payment_method)),
        ]))
    }
}

/// Checks and mailed payments count as manual; automatic bank transfers
/// and credit cards do not.
fn is_manual_payment(method: &str) -> bool {
    method == "Electronic check" || method == "Mailed check"
}

fn flag(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}
