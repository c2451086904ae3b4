pub mod handler;

pub const GREETING: &str = "آرثر هنا كل شيء يعمل بخير!";

pub async fn health_checks() -> handler::HealthCheck {
    handler::HealthCheck::default()
}
