use std::sync::Arc;

use paypal_relay::PaypalClient;

use crate::config::ServerConfig;
use crate::mail::{HttpMailSender, MailSender};

/// Shared application state. Everything here is immutable after startup —
/// requests share only configuration and client handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub paypal: Arc<PaypalClient>,
    /// Mail collaborator (None when MAIL_ENDPOINT is unset)
    pub mailer: Option<Arc<dyn MailSender>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let paypal = Arc::new(PaypalClient::new(
            &config.paypal_api_url,
            &config.paypal_client_id,
            &config.paypal_client_secret,
        ));

        let mailer: Option<Arc<dyn MailSender>> = config.mail_endpoint.as_ref().map(|endpoint| {
            Arc::new(HttpMailSender::new(
                endpoint,
                config.mail_api_key.as_deref(),
            )) as Arc<dyn MailSender>
        });

        Self {
            config: Arc::new(config),
            paypal,
            mailer,
        }
    }
}
