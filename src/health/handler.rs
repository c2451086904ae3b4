use super::GREETING;
use crate::utils::ApiTags;
use poem_openapi::{payload::PlainText, OpenApi};

#[derive(Default)]
pub struct HealthCheck;

#[OpenApi(tag = "ApiTags::HealthCheck")]
impl HealthCheck {
    #[oai(path = "/", method = "get", operation_id = "health::greeting")]
    async fn greeting(&self) -> PlainText<String> {
        PlainText(GREETING.to_string())
    }
}
