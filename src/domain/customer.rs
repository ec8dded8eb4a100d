//! Customer feature record for churn prediction.
//!
//! Based on the IBM Telco Customer Churn dataset (19 input columns).

use std::fmt;

/// An enumerated feature whose values are a fixed list of labels.
///
/// `OPTIONS` and `LABELS` are index-aligned, and the first entry is the
/// form default.
pub trait Categorical: Copy + PartialEq + Sized + 'static {
    const OPTIONS: &'static [Self];
    const LABELS: &'static [&'static str];

    /// The dataset label for this value.
    fn label(&self) -> &'static str;

    /// Parse a dataset label.
    fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| Self::OPTIONS[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Categorical for Gender {
    const OPTIONS: &'static [Self] = &[Self::Male, Self::Female];
    const LABELS: &'static [&'static str] = &["Male", "Female"];

    fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Plain yes/no answer (Partner, Dependents, PhoneService, PaperlessBilling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl Categorical for YesNo {
    const OPTIONS: &'static [Self] = &[Self::Yes, Self::No];
    const LABELS: &'static [&'static str] = &["Yes", "No"];

    fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipleLines {
    NoPhoneService,
    No,
    Yes,
}

impl Categorical for MultipleLines {
    const OPTIONS: &'static [Self] = &[Self::NoPhoneService, Self::No, Self::Yes];
    const LABELS: &'static [&'static str] = &["No phone service", "No", "Yes"];

    fn label(&self) -> &'static str {
        match self {
            Self::NoPhoneService => "No phone service",
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl Categorical for InternetService {
    const OPTIONS: &'static [Self] = &[Self::Dsl, Self::FiberOptic, Self::No];
    const LABELS: &'static [&'static str] = &["DSL", "Fiber optic", "No"];

    fn label(&self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }
}

/// Add-on that requires an internet subscription (security, backup,
/// protection, support, streaming).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternetAddon {
    NoInternetService,
    No,
    Yes,
}

impl Categorical for InternetAddon {
    const OPTIONS: &'static [Self] = &[Self::NoInternetService, Self::No, Self::Yes];
    const LABELS: &'static [&'static str] = &["No internet service", "No", "Yes"];

    fn label(&self) -> &'static str {
        match self {
            Self::NoInternetService => "No internet service",
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Categorical for Contract {
    const OPTIONS: &'static [Self] = &[Self::MonthToMonth, Self::OneYear, Self::TwoYear];
    const LABELS: &'static [&'static str] = &["Month-to-month", "One year", "Two year"];

    fn label(&self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    ElectronicCheck,
    MailedCheck,
    BankTransfer,
    CreditCard,
}

impl Categorical for PaymentMethod {
    const OPTIONS: &'static [Self] = &[
        Self::ElectronicCheck,
        Self::MailedCheck,
        Self::BankTransfer,
        Self::CreditCard,
    ];
    const LABELS: &'static [&'static str] = &[
        "Electronic check",
        "Mailed check",
        "Bank transfer (automatic)",
        "Credit card (automatic)",
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::ElectronicCheck => "Electronic check",
            Self::MailedCheck => "Mailed check",
            Self::BankTransfer => "Bank transfer (automatic)",
            Self::CreditCard => "Credit card (automatic)",
        }
    }
}

/// Value domain of a single input column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureDomain {
    /// One of a fixed list of labels
    Choice(&'static [&'static str]),
    /// Integer flag, 0 or 1
    Flag,
    /// Whole number in `[0, max]`
    Count { max: i64 },
    /// Non-negative amount
    Amount,
}

impl FeatureDomain {
    /// Whether a model may treat this column as a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Choice(_))
    }

    /// Check that `value` belongs to this domain.
    ///
    /// # Errors
    /// Returns a human-readable reason when it does not.
    pub fn check(&self, value: &FeatureValue) -> Result<(), String> {
        match (self, value) {
            (Self::Choice(labels), FeatureValue::Text(s)) => {
                if labels.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(format!("{s:?} is not one of {labels:?}"))
                }
            }
            (Self::Flag, FeatureValue::Int(v)) => {
                if *v == 0 || *v == 1 {
                    Ok(())
                } else {
                    Err(format!("{v} must be 0 or 1"))
                }
            }
            (Self::Count { max }, FeatureValue::Int(v)) => {
                if (0..=*max).contains(v) {
                    Ok(())
                } else {
                    Err(format!("{v} out of range [0, {max}]"))
                }
            }
            (Self::Amount, FeatureValue::Float(v)) => {
                if !v.is_finite() {
                    Err(format!("{v} is not a finite number"))
                } else if *v < 0.0 {
                    Err(format!("{v} must not be negative"))
                } else {
                    Ok(())
                }
            }
            (_, other) => Err(format!("unexpected value {other}")),
        }
    }
}

/// A named input column with its domain.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub domain: FeatureDomain,
}

/// Maximum tenure accepted by the form, in months.
const MAX_TENURE_MONTHS: i64 = 100;

/// The 19 input columns, in dataset order.
pub const FEATURES: [FeatureSpec; 19] = [
    FeatureSpec {
        name: "gender",
        domain: FeatureDomain::Choice(Gender::LABELS),
    },
    FeatureSpec {
        name: "SeniorCitizen",
        domain: FeatureDomain::Flag,
    },
    FeatureSpec {
        name: "Partner",
        domain: FeatureDomain::Choice(YesNo::LABELS),
    },
    FeatureSpec {
        name: "Dependents",
        domain: FeatureDomain::Choice(YesNo::LABELS),
    },
    FeatureSpec {
        name: "tenure",
        domain: FeatureDomain::Count { max: MAX_TENURE_MONTHS },
    },
    FeatureSpec {
        name: "PhoneService",
        domain: FeatureDomain::Choice(YesNo::LABELS),
    },
    FeatureSpec {
        name: "MultipleLines",
        domain: FeatureDomain::Choice(MultipleLines::LABELS),
    },
    FeatureSpec {
        name: "InternetService",
        domain: FeatureDomain::Choice(InternetService::LABELS),
    },
    FeatureSpec {
        name: "OnlineSecurity",
        domain: FeatureDomain::Choice(InternetAddon::LABELS),
    },
    FeatureSpec {
        name: "OnlineBackup",
        domain: FeatureDomain::Choice(InternetAddon::LABELS),
    },
    FeatureSpec {
        name: "DeviceProtection",
        domain: FeatureDomain::Choice(InternetAddon::LABELS),
    },
    FeatureSpec {
        name: "TechSupport",
        domain: FeatureDomain::Choice(InternetAddon::LABELS),
    },
    FeatureSpec {
        name: "StreamingTV",
        domain: FeatureDomain::Choice(InternetAddon::LABELS),
    },
    FeatureSpec {
        name: "StreamingMovies",
        domain: FeatureDomain::Choice(InternetAddon::LABELS),
    },
    FeatureSpec {
        name: "Contract",
        domain: FeatureDomain::Choice(Contract::LABELS),
    },
    FeatureSpec {
        name: "PaperlessBilling",
        domain: FeatureDomain::Choice(YesNo::LABELS),
    },
    FeatureSpec {
        name: "PaymentMethod",
        domain: FeatureDomain::Choice(PaymentMethod::LABELS),
    },
    FeatureSpec {
        name: "MonthlyCharges",
        domain: FeatureDomain::Amount,
    },
    FeatureSpec {
        name: "TotalCharges",
        domain: FeatureDomain::Amount,
    },
];

/// Column names, in dataset order.
pub const FEATURE_NAMES: [&str; 19] = {
    let mut names = [""; 19];
    let mut i = 0;
    while i < FEATURES.len() {
        names[i] = FEATURES[i].name;
        i += 1;
    }
    names
};

/// Look up the spec of a column by name.
#[must_use]
pub fn feature_spec(name: &str) -> Option<&'static FeatureSpec> {
    FEATURES.iter().find(|f| f.name == name)
}

/// A single cell of the one-row feature table.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

fn column<'a>(
    columns: &'a [(&str, FeatureValue)],
    name: &str,
) -> Result<&'a FeatureValue, String> {
    columns
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v)
        .ok_or_else(|| format!("Missing feature {name:?}"))
}

fn choice<T: Categorical>(columns: &[(&str, FeatureValue)], name: &str) -> Result<T, String> {
    match column(columns, name)? {
        FeatureValue::Text(label) => {
            T::from_label(label).ok_or_else(|| format!("{name}: invalid label {label:?}"))
        }
        other => Err(format!("{name}: expected a label, got {other}")),
    }
}

fn integer(columns: &[(&str, FeatureValue)], name: &str) -> Result<i64, String> {
    match column(columns, name)? {
        FeatureValue::Int(v) => Ok(*v),
        other => Err(format!("{name}: expected a whole number, got {other}")),
    }
}

fn amount(columns: &[(&str, FeatureValue)], name: &str) -> Result<f64, String> {
    match column(columns, name)? {
        FeatureValue::Float(v) => Ok(*v),
        other => Err(format!("{name}: expected an amount, got {other}")),
    }
}

/// One customer's attributes, built fresh for every form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFeatureRecord {
    pub gender: Gender,
    /// 0 = no, 1 = yes
    pub senior_citizen: bool,
    pub partner: YesNo,
    pub dependents: YesNo,
    /// Months with the company (0-100)
    pub tenure: u32,
    pub phone_service: YesNo,
    pub multiple_lines: MultipleLines,
    pub internet_service: InternetService,
    pub online_security: InternetAddon,
    pub online_backup: InternetAddon,
    pub device_protection: InternetAddon,
    pub tech_support: InternetAddon,
    pub streaming_tv: InternetAddon,
    pub streaming_movies: InternetAddon,
    pub contract: Contract,
    pub paperless_billing: YesNo,
    pub payment_method: PaymentMethod,
    pub monthly_charges: f64,
    pub total_charges: f64,
}

impl Default for CustomerFeatureRecord {
    /// The form's initial state: first option everywhere, tenure 1, no charges.
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            senior_citizen: false,
            partner: YesNo::Yes,
            dependents: YesNo::Yes,
            tenure: 1,
            phone_service: YesNo::Yes,
            multiple_lines: MultipleLines::NoPhoneService,
            internet_service: InternetService::Dsl,
            online_security: InternetAddon::NoInternetService,
            online_backup: InternetAddon::NoInternetService,
            device_protection: InternetAddon::NoInternetService,
            tech_support: InternetAddon::NoInternetService,
            streaming_tv: InternetAddon::NoInternetService,
            streaming_movies: InternetAddon::NoInternetService,
            contract: Contract::MonthToMonth,
            paperless_billing: YesNo::Yes,
            payment_method: PaymentMethod::ElectronicCheck,
            monthly_charges: 0.0,
            total_charges: 0.0,
        }
    }
}

impl CustomerFeatureRecord {
    /// Value of a column by dataset name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<FeatureValue> {
        let text = |s: &'static str| Some(FeatureValue::Text(s.to_string()));
        match name {
            "gender" => text(self.gender.label()),
            "SeniorCitizen" => Some(FeatureValue::Int(i64::from(self.senior_citizen))),
            "Partner" => text(self.partner.label()),
            "Dependents" => text(self.dependents.label()),
            "tenure" => Some(FeatureValue::Int(i64::from(self.tenure))),
            "PhoneService" => text(self.phone_service.label()),
            "MultipleLines" => text(self.multiple_lines.label()),
            "InternetService" => text(self.internet_service.label()),
            "OnlineSecurity" => text(self.online_security.label()),
            "OnlineBackup" => text(self.online_backup.label()),
            "DeviceProtection" => text(self.device_protection.label()),
            "TechSupport" => text(self.tech_support.label()),
            "StreamingTV" => text(self.streaming_tv.label()),
            "StreamingMovies" => text(self.streaming_movies.label()),
            "Contract" => text(self.contract.label()),
            "PaperlessBilling" => text(self.paperless_billing.label()),
            "PaymentMethod" => text(self.payment_method.label()),
            "MonthlyCharges" => Some(FeatureValue::Float(self.monthly_charges)),
            "TotalCharges" => Some(FeatureValue::Float(self.total_charges)),
            _ => None,
        }
    }

    /// Convert the record to the one-row table handed to the classifier.
    /// Order matches `FEATURE_NAMES`.
    #[must_use]
    pub fn to_columns(&self) -> Vec<(&'static str, FeatureValue)> {
        FEATURE_NAMES
            .iter()
            .filter_map(|name| self.value(name).map(|v| (*name, v)))
            .collect()
    }

    /// Build a record from named column values.
    ///
    /// Exactly the 19 schema columns must be present, each once, with a
    /// value inside its domain.
    ///
    /// # Errors
    /// Returns every problem found as a vector of strings.
    pub fn from_columns(columns: &[(&str, FeatureValue)]) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        for (i, (name, value)) in columns.iter().enumerate() {
            match feature_spec(name) {
                None => errors.push(format!("Unknown feature {name:?}")),
                Some(spec) => {
                    if columns[..i].iter().any(|(prev, _)| prev == name) {
                        errors.push(format!("Duplicate feature {name:?}"));
                    } else if let Err(reason) = spec.domain.check(value) {
                        errors.push(format!("{name}: {reason}"));
                    }
                }
            }
        }
        for name in FEATURE_NAMES {
            if !columns.iter().any(|(n, _)| *n == name) {
                errors.push(format!("Missing feature {name:?}"));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let build = || -> Result<Self, String> {
            Ok(Self {
                gender: choice(columns, "gender")?,
                senior_citizen: integer(columns, "SeniorCitizen")? == 1,
                partner: choice(columns, "Partner")?,
                dependents: choice(columns, "Dependents")?,
                tenure: u32::try_from(integer(columns, "tenure")?)
                    .map_err(|e| format!("tenure: {e}"))?,
                phone_service: choice(columns, "PhoneService")?,
                multiple_lines: choice(columns, "MultipleLines")?,
                internet_service: choice(columns, "InternetService")?,
                online_security: choice(columns, "OnlineSecurity")?,
                online_backup: choice(columns, "OnlineBackup")?,
                device_protection: choice(columns, "DeviceProtection")?,
                tech_support: choice(columns, "TechSupport")?,
                streaming_tv: choice(columns, "StreamingTV")?,
                streaming_movies: choice(columns, "StreamingMovies")?,
                contract: choice(columns, "Contract")?,
                paperless_billing: choice(columns, "PaperlessBilling")?,
                payment_method: choice(columns, "PaymentMethod")?,
                monthly_charges: amount(columns, "MonthlyCharges")?,
                total_charges: amount(columns, "TotalCharges")?,
            })
        };

        build().map_err(|e| vec![e])
    }

    /// Validate the numeric fields.
    ///
    /// Enumerated fields are valid by construction.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = ["tenure", "MonthlyCharges", "TotalCharges"]
            .iter()
            .filter_map(|name| {
                let spec = feature_spec(name)?;
                let value = self.value(name)?;
                spec.domain.check(&value).err().map(|e| format!("{name}: {e}"))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
