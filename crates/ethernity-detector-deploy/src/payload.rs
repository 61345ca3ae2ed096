use crate::opcodes::Instruction;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ethernity_core::{Error, Result};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Codificação do payload de opcodes anexado ao alerta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// JSON comprimido com gzip e codificado em base64 padrão
    GzipBase64,
    /// JSON sem compressão
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcodePayload {
    pub encoding: PayloadEncoding,
    pub data: String,
}

impl OpcodePayload {
    /// Recupera o JSON serializado das instruções.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        match self.encoding {
            PayloadEncoding::GzipBase64 => decompress(&self.data),
            PayloadEncoding::Json => Ok(self.data.clone().into_bytes()),
        }
    }
}

/// Comprime com gzip e codifica em base64.
pub fn compress(data: &[u8]) -> Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::CompressionError(format!("falha ao comprimir payload: {}", e)))?;
    let compressed = encoder
        .finish()
        .map_err(|e| Error::CompressionError(format!("falha ao finalizar gzip: {}", e)))?;
    Ok(STANDARD.encode(compressed))
}

/// Inverso de [`compress`].
pub fn decompress(text: &str) -> Result<Vec<u8>> {
    let compressed = STANDARD
        .decode(text.trim())
        .map_err(|e| Error::CompressionError(format!("base64 inválido: {}", e)))?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::CompressionError(format!("gzip inválido: {}", e)))?;
    Ok(out)
}

/// Serializa as instruções e aplica o limite de tamanho do texto final.
///
/// Tudo ou nada: um payload acima de `max_bytes` é rejeitado inteiro.
pub fn encode_opcodes(instructions: &[Instruction], compress_payload: bool, max_bytes: usize) -> Result<OpcodePayload> {
    let json = serde_json::to_vec(instructions)
        .map_err(|e| Error::EncodeError(format!("falha ao serializar opcodes: {}", e)))?;

    let payload = if compress_payload {
        OpcodePayload { encoding: PayloadEncoding::GzipBase64, data: compress(&json)? }
    } else {
        let data = String::from_utf8(json)
            .map_err(|e| Error::EncodeError(format!("JSON não UTF-8: {}", e)))?;
        OpcodePayload { encoding: PayloadEncoding::Json, data }
    };

    if payload.data.len() > max_bytes {
        return Err(Error::ValidationError(format!(
            "payload de opcodes com {} bytes excede o limite de {}",
            payload.data.len(),
            max_bytes
        )));
    }
    Ok(payload)
}
