//! Gateway configuration (Moolah.io merchant settings)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{CheckoutUrls, Cryptocurrency, CurrencyOption};
use crate::ports::SettingsStore;

use super::error::ValidationError;

/// Merchant settings for the payment gateway.
///
/// Loaded once at startup; the plugin option names are kept so the same
/// struct can also be built from a host [`SettingsStore`].
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway offered at checkout
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Payment method title shown at checkout
    #[serde(default = "default_title")]
    pub title: String,

    /// Payment method description shown at checkout
    #[serde(default = "default_description")]
    pub description: String,

    /// Merchant API key
    #[serde(default = "empty_secret")]
    pub api_key: SecretString,

    /// Shared secret for request hashes and IPN authentication
    #[serde(default = "empty_secret")]
    pub ipn_secret: SecretString,

    /// Merchant invoice prefix; stored with the settings, not sent to the processor
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,

    #[serde(default)]
    pub send_shipping: bool,

    /// Redirect straight to the processor from the pay page
    #[serde(default)]
    pub form_submission_method: bool,

    #[serde(default)]
    pub bitcoin_guid: Option<String>,
    #[serde(default)]
    pub litecoin_guid: Option<String>,
    #[serde(default)]
    pub dogecoin_guid: Option<String>,
    #[serde(default)]
    pub vertcoin_guid: Option<String>,
    #[serde(default)]
    pub auroracoin_guid: Option<String>,
    #[serde(default)]
    pub mintcoin_guid: Option<String>,
    #[serde(default)]
    pub darkcoin_guid: Option<String>,
    #[serde(default)]
    pub maxcoin_guid: Option<String>,

    /// Processor API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Public URL of the store, used for return and callback URLs
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

impl GatewayConfig {
    /// Configured GUID for `coin`, ignoring blank values.
    pub fn guid_for(&self, coin: Cryptocurrency) -> Option<&str> {
        let guid = match coin {
            Cryptocurrency::Bitcoin => &self.bitcoin_guid,
            Cryptocurrency::Litecoin => &self.litecoin_guid,
            Cryptocurrency::Dogecoin => &self.dogecoin_guid,
            Cryptocurrency::Vertcoin => &self.vertcoin_guid,
            Cryptocurrency::Auroracoin => &self.auroracoin_guid,
            Cryptocurrency::Mintcoin => &self.mintcoin_guid,
            Cryptocurrency::Darkcoin => &self.darkcoin_guid,
            Cryptocurrency::Maxcoin => &self.maxcoin_guid,
        };
        guid.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }

    fn guid_slot(&mut self, coin: Cryptocurrency) -> &mut Option<String> {
        match coin {
            Cryptocurrency::Bitcoin => &mut self.bitcoin_guid,
            Cryptocurrency::Litecoin => &mut self.litecoin_guid,
            Cryptocurrency::Dogecoin => &mut self.dogecoin_guid,
            Cryptocurrency::Vertcoin => &mut self.vertcoin_guid,
            Cryptocurrency::Auroracoin => &mut self.auroracoin_guid,
            Cryptocurrency::Mintcoin => &mut self.mintcoin_guid,
            Cryptocurrency::Darkcoin => &mut self.darkcoin_guid,
            Cryptocurrency::Maxcoin => &mut self.maxcoin_guid,
        }
    }

    /// Set the GUID for `coin`.
    pub fn with_guid(mut self, coin: Cryptocurrency, guid: impl Into<String>) -> Self {
        *self.guid_slot(coin) = Some(guid.into());
        self
    }

    /// Currencies offered at checkout, in display order.
    pub fn currency_options(&self) -> Vec<CurrencyOption> {
        Cryptocurrency::ALL
            .iter()
            .filter_map(|&coin| {
                self.guid_for(coin).map(|guid| CurrencyOption {
                    currency: coin,
                    guid: guid.to_string(),
                })
            })
            .collect()
    }

    /// Whether `guid` is one of the configured currency GUIDs.
    pub fn is_configured_guid(&self, guid: &str) -> bool {
        Cryptocurrency::ALL
            .iter()
            .any(|&coin| self.guid_for(coin) == Some(guid))
    }

    /// Whether the gateway can be offered at checkout.
    pub fn is_available(&self) -> bool {
        self.enabled && self.missing_credentials().is_none() && !self.currency_options().is_empty()
    }

    fn missing_credentials(&self) -> Option<&'static str> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Some("gateway.api_key");
        }
        if self.ipn_secret.expose_secret().is_empty() {
            return Some("gateway.ipn_secret");
        }
        None
    }

    /// Outbound timeout for the processor API.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn checkout_urls(&self) -> CheckoutUrls {
        CheckoutUrls::new(self.site_url.clone())
    }

    /// Validate gateway configuration
    ///
    /// Credentials and GUIDs are only required while the gateway is enabled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if url::Url::parse(&self.site_url).is_err() {
            return Err(ValidationError::InvalidUrl("gateway.site_url"));
        }
        if url::Url::parse(&self.api_base_url).is_err() {
            return Err(ValidationError::InvalidUrl("gateway.api_base_url"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.enabled {
            if let Some(field) = self.missing_credentials() {
                return Err(ValidationError::MissingRequired(field));
            }
            if self.currency_options().is_empty() {
                return Err(ValidationError::NoCurrencyConfigured);
            }
        }
        Ok(())
    }

    /// Build the configuration from host plugin options.
    ///
    /// Entry point for embedding the gateway in a host that owns the option
    /// storage; the standalone binary reads the environment instead.
    ///
    /// Option values follow the host conventions: checkboxes are `"yes"`
    /// when ticked and GUIDs live under `<coin>_guid`. Settings the host
    /// does not store (API base URL, timeout, site URL) come from `base`.
    pub async fn from_settings(
        store: &dyn SettingsStore,
        base: &GatewayConfig,
    ) -> Result<Self, DomainError> {
        let mut config = GatewayConfig {
            enabled: store.get_or("enabled", "yes").await? == "yes",
            title: store.get_or("title", &default_title()).await?,
            description: store.get_or("description", &default_description()).await?,
            api_key: SecretString::new(store.get_or("api_key", "").await?),
            ipn_secret: SecretString::new(store.get_or("ipn_secret", "").await?),
            invoice_prefix: store
                .get_or("invoice_prefix", &default_invoice_prefix())
                .await?,
            send_shipping: store.get_or("send_shipping", "no").await? == "yes",
            form_submission_method: store.get_or("form_submission_method", "no").await? == "yes",
            bitcoin_guid: None,
            litecoin_guid: None,
            dogecoin_guid: None,
            vertcoin_guid: None,
            auroracoin_guid: None,
            mintcoin_guid: None,
            darkcoin_guid: None,
            maxcoin_guid: None,
            api_base_url: base.api_base_url.clone(),
            request_timeout_secs: base.request_timeout_secs,
            site_url: base.site_url.clone(),
        };

        for coin in Cryptocurrency::ALL {
            *config.guid_slot(coin) = store.get(&coin.guid_setting_key()).await?;
        }

        Ok(config)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            title: default_title(),
            description: default_description(),
            api_key: empty_secret(),
            ipn_secret: empty_secret(),
            invoice_prefix: default_invoice_prefix(),
            send_shipping: false,
            form_submission_method: false,
            bitcoin_guid: None,
            litecoin_guid: None,
            dogecoin_guid: None,
            vertcoin_guid: None,
            auroracoin_guid: None,
            mintcoin_guid: None,
            darkcoin_guid: None,
            maxcoin_guid: None,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            site_url: default_site_url(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_title() -> String {
    "Crypto currencies".to_string()
}

fn default_description() -> String {
    "Pay with Bitcoin, Litecoin, Dogecoin or other altcoins via Moolah.io".to_string()
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_invoice_prefix() -> String {
    "WC-".to_string()
}

fn default_api_base_url() -> String {
    "https://moolah.io".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}
