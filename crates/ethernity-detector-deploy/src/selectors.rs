use crate::opcodes::{Instruction, PUSH32, PUSH4};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Candidatos extraídos de um fluxo de instruções, em ordem de primeira aparição.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorCandidates {
    /// Imediatos de PUSH4 (possíveis seletores de função), em hex sem prefixo
    pub functions: Vec<String>,
    /// Imediatos de PUSH32 (possíveis tópicos de evento), em hex sem prefixo
    pub events: Vec<String>,
}

impl SelectorCandidates {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.events.is_empty()
    }
}

/// Percorre as instruções uma única vez separando imediatos de 4 e 32 bytes.
///
/// A deduplicação compara os bytes do imediato e usa um único conjunto para as duas
/// listas. Pushes truncados no fim do código não entram.
pub fn extract(instructions: &[Instruction]) -> SelectorCandidates {
    let mut seen: HashSet<&[u8]> = HashSet::new();
    let mut candidates = SelectorCandidates::default();

    for ins in instructions {
        let target = match ins.opcode {
            PUSH4 => &mut candidates.functions,
            PUSH32 => &mut candidates.events,
            _ => continue,
        };
        let Some(data) = ins.full_immediate() else { continue };
        if seen.insert(data) {
            target.push(hex::encode(data));
        }
    }

    candidates
}
