//! Auth0 links derived from the environment.
//!
//! These only build URLs. The login flow itself runs between the browser and
//! the identity provider.

use crate::environment::AuthConfig;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use url::Url;

const AUTH0_HOST_SUFFIX: &str = "auth0.com";

impl AuthConfig {
    /// `erigre.eu` becomes `erigre.eu.auth0.com`.
    pub fn tenant_domain(&self) -> String {
        format!("{}.{}", self.domain_prefix(), AUTH0_HOST_SUFFIX)
    }

    /// Expected `iss` claim of tokens issued by the tenant.
    pub fn issuer_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}/", self.tenant_domain()))
    }

    pub fn jwks_url(&self) -> Result<Url, url::ParseError> {
        self.issuer_url()?.join(".well-known/jwks.json")
    }

    /// Implicit-flow authorize link. `callback_path` is appended to the
    /// callback URL verbatim, e.g. `/tabs/user-page`.
    pub fn login_url(&self, callback_path: &str) -> Result<Url, url::ParseError> {
        let redirect_uri = format!("{}{}", self.callback_url(), callback_path);
        let login_url = format!(
            "https://{}/authorize?audience={}&response_type=token&client_id={}&redirect_uri={}",
            self.tenant_domain(),
            utf8_percent_encode(self.audience(), NON_ALPHANUMERIC),
            utf8_percent_encode(self.client_id(), NON_ALPHANUMERIC),
            utf8_percent_encode(&redirect_uri, NON_ALPHANUMERIC),
        );

        Url::parse(&login_url)
    }

    pub fn logout_url(&self) -> Result<Url, url::ParseError> {
        let logout_url = format!(
            "https://{}/v2/logout?returnTo={}&client_id={}",
            self.tenant_domain(),
            utf8_percent_encode(self.callback_url().as_str(), NON_ALPHANUMERIC),
            utf8_percent_encode(self.client_id(), NON_ALPHANUMERIC),
        );

        Url::parse(&logout_url)
    }
}
