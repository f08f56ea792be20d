use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::Reference;
use crate::listing::{Identified, Searchable};

// ── Shared forensic enums ───────────────────────────────────────────

/// Sex recorded for a victim or the remains in an evidence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Masculino,
    Feminino,
    Indeterminado,
}

pub const SEXES: &[Sex] = &[Sex::Masculino, Sex::Feminino, Sex::Indeterminado];

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Masculino => "masculino",
            Sex::Feminino => "feminino",
            Sex::Indeterminado => "indeterminado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Masculino => "Masculino",
            Sex::Feminino => "Feminino",
            Sex::Indeterminado => "Indeterminado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        SEXES.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Physical state of the body when examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyCondition {
    Inteiro,
    Fragmentado,
    Carbonizado,
    Putrefacto,
    Esqueleto,
}

pub const BODY_CONDITIONS: &[BodyCondition] = &[
    BodyCondition::Inteiro,
    BodyCondition::Fragmentado,
    BodyCondition::Carbonizado,
    BodyCondition::Putrefacto,
    BodyCondition::Esqueleto,
];

impl BodyCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyCondition::Inteiro => "inteiro",
            BodyCondition::Fragmentado => "fragmentado",
            BodyCondition::Carbonizado => "carbonizado",
            BodyCondition::Putrefacto => "putrefacto",
            BodyCondition::Esqueleto => "esqueleto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyCondition::Inteiro => "Inteiro",
            BodyCondition::Fragmentado => "Fragmentado",
            BodyCondition::Carbonizado => "Carbonizado",
            BodyCondition::Putrefacto => "Putrefacto",
            BodyCondition::Esqueleto => "Esqueleto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        BODY_CONDITIONS.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Whether the victim linked to an evidence item has been identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictimIdentification {
    #[serde(rename = "identificada")]
    Identificada,
    #[serde(rename = "nao identificada")]
    NaoIdentificada,
}

pub const VICTIM_IDENTIFICATIONS: &[VictimIdentification] = &[
    VictimIdentification::Identificada,
    VictimIdentification::NaoIdentificada,
];

impl VictimIdentification {
    pub fn as_str(&self) -> &'static str {
        match self {
            VictimIdentification::Identificada => "identificada",
            VictimIdentification::NaoIdentificada => "nao identificada",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VictimIdentification::Identificada => "Identificada",
            VictimIdentification::NaoIdentificada => "Não identificada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        VICTIM_IDENTIFICATIONS.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn from_flag(identified: bool) -> Self {
        if identified {
            VictimIdentification::Identificada
        } else {
            VictimIdentification::NaoIdentificada
        }
    }
}

impl fmt::Display for VictimIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Victim record ───────────────────────────────────────────────────

/// A person record associated with a case. Read-only in this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victim {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub data_nascimento: Option<String>,
    #[serde(default)]
    pub idade_aproximada: Option<u32>,
    #[serde(default)]
    pub nacionalidade: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    pub sexo: Sex,
    pub estado_corpo: BodyCondition,
    #[serde(default)]
    pub lesoes: Option<String>,
    #[serde(default)]
    pub identificada: bool,
    #[serde(default)]
    pub caso: Option<Reference>,
}

impl Victim {
    /// Name, or a placeholder for unidentified remains.
    pub fn display_name(&self) -> &str {
        self.nome
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Sem identificação")
    }

    pub fn identification(&self) -> VictimIdentification {
        VictimIdentification::from_flag(self.identificada)
    }

    pub fn caso_label(&self) -> &str {
        self.caso.as_ref().map(Reference::label).unwrap_or("—")
    }
}

impl Identified for Victim {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Victim {
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.display_name(),
            self.cidade.as_deref().unwrap_or_default(),
            self.nacionalidade.as_deref().unwrap_or_default(),
            self.caso_label()
        )
    }
}
