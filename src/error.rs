use log::{debug, error};
use types::domain::ErrorBody;
use types::error::Error;

use crate::domain::request::HandlerResponse;

pub fn report_into_response(e: Error) -> HandlerResponse {
    let status = e.status_code();
    if status.is_server_error() {
        error!("Error occurred: {:?}", e);
    } else {
        debug!("Rejected request: {}", e);
    }
    HandlerResponse::json(status, &ErrorBody::from(e))
}
