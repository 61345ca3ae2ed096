use ethernity_core::{utils::{keccak256, normalize_hex}, Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const BUNDLED_FUNCTIONS: &str = include_str!("../data/functions.json");
const BUNDLED_EVENTS: &str = include_str!("../data/events.json");

/// Tabela estática hex -> assinaturas legíveis.
///
/// Um mesmo hex pode ter várias assinaturas (colisões); a ordem do arquivo de origem é
/// preservada. Depois de carregada a tabela não muda.
#[derive(Debug, Clone, Default)]
pub struct SignatureDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl SignatureDictionary {
    /// Interpreta um objeto JSON `{ "hex": ["assinatura", ...] }`.
    ///
    /// Chaves que normalizam para o mesmo hex são fundidas na ordem do documento.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| Error::DecodeError(format!("dicionário de assinaturas inválido: {}", e)))?;
        Ok(Self::from_entries(raw))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (hex, signatures) in entries {
            // chaves "0xA9059CBB" e "a9059cbb" se fundem
            map.entry(normalize_hex(hex.as_ref()))
                .or_default()
                .extend(signatures);
        }
        Self { entries: map }
    }

    /// Seletores de função distribuídos com a crate.
    pub fn bundled_functions() -> Result<Self> {
        Self::from_json_str(BUNDLED_FUNCTIONS)
    }

    /// Tópicos de evento distribuídos com a crate.
    pub fn bundled_events() -> Result<Self> {
        Self::from_json_str(BUNDLED_EVENTS)
    }

    pub fn lookup(&self, hex: &str) -> &[String] {
        self.entries
            .get(&normalize_hex(hex))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

/// Par de dicionários (funções e eventos) compartilhado entre análises.
#[derive(Debug, Clone)]
pub struct SignatureDictionaries {
    pub functions: Arc<SignatureDictionary>,
    pub events: Arc<SignatureDictionary>,
}

impl SignatureDictionaries {
    pub fn new(functions: SignatureDictionary, events: SignatureDictionary) -> Self {
        Self {
            functions: Arc::new(functions),
            events: Arc::new(events),
        }
    }

    pub fn bundled() -> Result<Self> {
        Ok(Self::new(
            SignatureDictionary::bundled_functions()?,
            SignatureDictionary::bundled_events()?,
        ))
    }

    /// Carrega os dicionários, substituindo os embutidos pelos arquivos informados.
    pub fn load(functions_path: Option<&Path>, events_path: Option<&Path>) -> Result<Self> {
        let functions = match functions_path {
            Some(path) => SignatureDictionary::from_path(path)?,
            None => SignatureDictionary::bundled_functions()?,
        };
        let events = match events_path {
            Some(path) => SignatureDictionary::from_path(path)?,
            None => SignatureDictionary::bundled_events()?,
        };
        Ok(Self::new(functions, events))
    }
}

/// Assinatura encontrada para um candidato.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMatch {
    pub text: String,
    pub hex: String,
}

/// Resultado da resolução: cada candidato cai em exatamente um dos dois grupos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub matched: Vec<SignatureMatch>,
    pub unresolved: Vec<String>,
}

/// Resolve candidatos contra um dicionário, na ordem de entrada.
///
/// Um hex com N assinaturas gera N entradas em `matched`; sem entrada (ou com entrada
/// vazia) o hex vai para `unresolved`.
pub fn resolve(candidates: &[String], dictionary: &SignatureDictionary) -> Resolution {
    let mut resolution = Resolution::default();
    for hex in candidates {
        let signatures = dictionary.lookup(hex);
        if signatures.is_empty() {
            resolution.unresolved.push(hex.clone());
            continue;
        }
        resolution
            .matched
            .extend(signatures.iter().map(|text| SignatureMatch {
                text: text.clone(),
                hex: hex.clone(),
            }));
    }
    resolution
}

/// Seletor de 4 bytes de uma assinatura de função, em hex.
pub fn selector_of(signature: &str) -> String {
    hex::encode(&keccak256(signature.as_bytes())[..4])
}

/// Tópico de 32 bytes de uma assinatura de evento, em hex.
pub fn topic_of(signature: &str) -> String {
    hex::encode(keccak256(signature.as_bytes()))
}
