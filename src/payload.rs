//! Payload builders for the common QR content types: contact cards, WiFi
//! credentials, UPI payments, SMS and email links. Plain string templating;
//! the interesting work happens after encoding, in the compositing stages.

/// Contact fields for a vCard 3.0 payload.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContactCard {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number, free-form.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Optional organization line.
    pub organization: Option<String>,
    /// Optional homepage URL.
    pub url: Option<String>,
}

/// Render a vCard 3.0 document. Empty optional fields are omitted.
pub fn vcard(contact: &ContactCard) -> String {
    let mut lines = vec![
        "BEGIN:VCARD".to_owned(),
        "VERSION:3.0".to_owned(),
        format!("FN:{} {}", contact.first_name, contact.last_name),
        format!("N:{};{};;;", contact.last_name, contact.first_name),
    ];
    if !contact.phone.is_empty() {
        lines.push(format!("TEL:{}", contact.phone));
    }
    if !contact.email.is_empty() {
        lines.push(format!("EMAIL:{}", contact.email));
    }
    if let Some(org) = contact.organization.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("ORG:{org}"));
    }
    if let Some(url) = contact.url.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("URL:{url}"));
    }
    lines.push("END:VCARD".to_owned());
    lines.join("\n")
}

/// WiFi authentication schemes recognized by the `WIFI:` payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WifiSecurity {
    /// WPA/WPA2 personal.
    #[default]
    Wpa,
    /// Legacy WEP.
    Wep,
    /// Open network.
    Nopass,
}

impl WifiSecurity {
    fn token(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::Nopass => "nopass",
        }
    }
}

/// WiFi credentials for a `WIFI:` payload.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WifiNetwork {
    /// Network name.
    pub ssid: String,
    /// Passphrase; ignored by scanners for open networks.
    pub password: String,
    /// Authentication scheme.
    pub security: WifiSecurity,
    /// Whether the SSID is hidden.
    pub hidden: bool,
}

/// Render a `WIFI:` credential payload.
pub fn wifi(network: &WifiNetwork) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        network.security.token(),
        network.ssid,
        network.password,
        if network.hidden { "true" } else { "false" }
    )
}

/// Fields of a UPI payment deep link.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UpiPayment {
    /// Payee VPA (virtual payment address).
    pub payee_id: String,
    /// Display name of the payee.
    pub payee_name: String,
    /// Optional fixed amount.
    pub amount: Option<f64>,
    /// Optional ISO currency code.
    pub currency: Option<String>,
    /// Optional transaction note.
    pub note: Option<String>,
}

/// Render a `upi://pay` deep link.
pub fn upi(payment: &UpiPayment) -> String {
    let mut out = format!(
        "upi://pay?pa={}&pn={}",
        payment.payee_id,
        urlencoding::encode(&payment.payee_name)
    );
    if let Some(amount) = payment.amount {
        out.push_str(&format!("&am={amount}"));
    }
    if let Some(currency) = payment.currency.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("&cu={currency}"));
    }
    if let Some(note) = payment.note.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("&tn={}", urlencoding::encode(note)));
    }
    out
}

/// Render an `sms:` link with a prefilled body.
pub fn sms(phone: &str, message: &str) -> String {
    format!("sms:{phone}?body={}", urlencoding::encode(message))
}

/// Render a `mailto:` link with optional subject and body.
pub fn mailto(to: &str, subject: Option<&str>, body: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(subject) = subject.filter(|s| !s.is_empty()) {
        params.push(format!("subject={}", urlencoding::encode(subject)));
    }
    if let Some(body) = body.filter(|s| !s.is_empty()) {
        params.push(format!("body={}", urlencoding::encode(body)));
    }

    if params.is_empty() {
        format!("mailto:{to}")
    } else {
        format!("mailto:{to}?{}", params.join("&"))
    }
}
