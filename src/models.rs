use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_BASE_URL: &str = "https://investidor.suno.com.br/carteiras";
pub const SHEET_CACHE_KEY_PREFIX: &str = "sheet:carteira:v1:";
pub const SHEET_CACHE_TTL_SECONDS: u32 = 30 * 60;

/// One portfolio page, each bound to its own named parsing preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dividendos,
    Fiis,
    Valor,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Dividendos, Self::Fiis, Self::Valor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dividendos => "dividendos",
            Self::Fiis => "fiis",
            Self::Valor => "valor",
        }
    }

    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dividendos" => Some(Self::Dividendos),
            "fiis" => Some(Self::Fiis),
            "valor" => Some(Self::Valor),
            _ => None,
        }
    }

    #[must_use]
    pub fn source_url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    pub carteira: Category,
    pub source_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesResponse {
    pub items: Vec<CategoryInfo>,
}

/// Serializable view of a preset, with the column order already validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresetResponse {
    pub carteira: Category,
    pub column_order: Vec<usize>,
    pub modified_columns: Vec<usize>,
    pub remove_header_row: bool,
    pub remove_footer_row: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
