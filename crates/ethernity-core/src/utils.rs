/*!
 * Ethernity Utils
 * 
 * Utilitários comuns usados em toda a workspace Ethernity
 */

use ethereum_types::Address;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

/// Remove o prefixo `0x`/`0X`, se houver
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Normaliza uma string hexadecimal: sem prefixo, sem espaços, minúscula
pub fn normalize_hex(hex: &str) -> String {
    strip_hex_prefix(hex.trim()).to_ascii_lowercase()
}

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    Address::from_str(strip_hex_prefix(hex)).ok()
}

/// Verifica se o destinatário declarado é ausente ou o endereço zero
pub fn is_null_recipient(to: Option<&Address>) -> bool {
    to.map_or(true, |addr| addr.is_zero())
}

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}
