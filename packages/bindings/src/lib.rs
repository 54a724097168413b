use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[napi]
pub fn minimum_payment(input_json: String) -> NapiResult<String> {
    let input: loan_sim_core::amortization::payment::PaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sim_core::amortization::payment::calculate_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_loan(input_json: String) -> NapiResult<String> {
    let params: loan_sim_core::amortization::schedule::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sim_core::amortization::schedule::simulate_loan(&params)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation views
// ---------------------------------------------------------------------------

#[napi]
pub fn chart_series(input_json: String) -> NapiResult<String> {
    let params: loan_sim_core::amortization::schedule::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sim_core::amortization::schedule::simulate_loan(&params)
        .map_err(to_napi_error)?;
    let series = loan_sim_core::amortization::summary::chart_series(&output.result);
    serde_json::to_string(&series).map_err(to_napi_error)
}

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    let params: loan_sim_core::amortization::schedule::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sim_core::amortization::schedule::simulate_loan(&params)
        .map_err(to_napi_error)?;
    let summary = loan_sim_core::amortization::summary::summarize(&output.result);
    serde_json::to_string(&summary).map_err(to_napi_error)
}
