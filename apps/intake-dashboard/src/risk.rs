//! Triagem por regras a partir do texto de sintomas
//!
//! O rótulo é calculado na leitura e nunca gravado, então mudar as regras
//! reclassifica também o histórico.

use serde::{Serialize, Serializer};
use std::fmt;

/// Rótulo de risco derivado dos sintomas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    HighFluRisk,
    ModerateInfectionRisk,
    PossibleRespiratoryIssue,
    LowRisk,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::HighFluRisk => "High Flu Risk",
            RiskLabel::ModerateInfectionRisk => "Moderate Infection Risk",
            RiskLabel::PossibleRespiratoryIssue => "Possible Respiratory Issue",
            RiskLabel::LowRisk => "Low Risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RiskLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classifica o texto de sintomas; a primeira regra satisfeita vence.
///
/// A ordem é política clínica e não deve ser alterada:
/// febre + tosse, febre, tosse ou falta de ar, demais casos.
pub fn classify(symptoms: &str) -> RiskLabel {
    let symptoms = symptoms.to_lowercase();
    let fever = symptoms.contains("fever");
    let cough = symptoms.contains("cough");

    if fever && cough {
        RiskLabel::HighFluRisk
    } else if fever {
        RiskLabel::ModerateInfectionRisk
    } else if cough || symptoms.contains("shortness of breath") {
        RiskLabel::PossibleRespiratoryIssue
    } else {
        RiskLabel::LowRisk
    }
}
