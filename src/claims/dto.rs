use serde::{Deserialize, Serialize};

/// Request body for submitting proof of completion.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitProofRequest {
    pub proof_description: Option<String>,
    pub proof_url: Option<String>,
}

/// Request body for the creator's review verdict.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub approved: bool,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub message: String,
    pub approved: bool,
}

#[derive(Debug, Serialize)]
pub struct ProofUploadResponse {
    pub proof_url: String,
}
