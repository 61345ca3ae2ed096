use ethernity_core::{Error, Result};
use serde::{Serialize, Serializer};
use std::borrow::Cow;

pub const PUSH0: u8 = 0x5f;
pub const PUSH1: u8 = 0x60;
/// Push de 4 bytes, a largura de um seletor de função
pub const PUSH4: u8 = 0x63;
/// Push de 32 bytes, a largura de um tópico de evento
pub const PUSH32: u8 = 0x7f;

/// Instrução decodificada do bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub pc: usize,
    pub opcode: u8,
    /// Dados imediatos de um PUSH; ausente para as demais instruções e para PUSH0
    pub immediate: Option<Vec<u8>>,
}

impl Instruction {
    pub fn mnemonic(&self) -> Cow<'static, str> {
        mnemonic(self.opcode)
    }

    /// Largura declarada do imediato (1..=32) para PUSH1..PUSH32.
    pub fn push_width(&self) -> Option<usize> {
        push_width(self.opcode)
    }

    /// Retorna o imediato apenas se tiver exatamente a largura declarada pelo opcode.
    pub fn full_immediate(&self) -> Option<&[u8]> {
        let width = self.push_width()?;
        self.immediate
            .as_deref()
            .filter(|data| data.len() == width)
    }
}

/// Formato serializado consumido por quem lê o payload de opcodes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionRecord {
    pc: usize,
    opcode: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_value: Option<String>,
}

impl Serialize for Instruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        InstructionRecord {
            pc: self.pc,
            opcode: self.mnemonic(),
            push_value: self
                .immediate
                .as_ref()
                .map(|data| format!("0x{}", hex::encode(data))),
        }
        .serialize(serializer)
    }
}

pub fn push_width(opcode: u8) -> Option<usize> {
    if (PUSH1..=PUSH32).contains(&opcode) {
        Some((opcode - PUSH1 + 1) as usize)
    } else {
        None
    }
}

/// Decodificador de bytecode em fluxo de instruções.
pub trait BytecodeDecoder: Send + Sync {
    fn decode(&self, code: &[u8]) -> Result<Vec<Instruction>>;
}

/// Decodificador linear de bytecode EVM.
///
/// No modo padrão um PUSH cujo imediato ultrapassa o fim do código é mantido com os
/// bytes disponíveis, como acontece com o trailer de metadados do Solidity. No modo
/// estrito esse caso é um `DecodeError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmDecoder {
    pub strict: bool,
}

impl EvmDecoder {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl BytecodeDecoder for EvmDecoder {
    fn decode(&self, code: &[u8]) -> Result<Vec<Instruction>> {
        let mut instructions = Vec::new();
        let mut i = 0;
        while i < code.len() {
            let opcode = code[i];
            let pc = i;
            let mut immediate = None;
            if let Some(n) = push_width(opcode) {
                let end = core::cmp::min(i + 1 + n, code.len());
                if self.strict && end - (i + 1) < n {
                    return Err(Error::DecodeError(format!(
                        "{} em 0x{:x} exige {} bytes, restam {}",
                        mnemonic(opcode),
                        pc,
                        n,
                        end - (i + 1)
                    )));
                }
                immediate = Some(code[i + 1..end].to_vec());
                i += 1 + n;
            } else {
                i += 1;
            }
            instructions.push(Instruction { pc, opcode, immediate });
        }
        Ok(instructions)
    }
}

/// Decodifica com o decodificador padrão.
pub fn decode(code: &[u8]) -> Result<Vec<Instruction>> {
    EvmDecoder::default().decode(code)
}

/// Mnemônico do opcode; bytes não atribuídos aparecem como `UNKNOWN_0x..`.
pub fn mnemonic(opcode: u8) -> Cow<'static, str> {
    let name = match opcode {
        0x00 => "STOP",
        0x01 => "ADD",
        0x02 => "MUL",
        0x03 => "SUB",
        0x04 => "DIV",
        0x05 => "SDIV",
        0x06 => "MOD",
        0x07 => "SMOD",
        0x08 => "ADDMOD",
        0x09 => "MULMOD",
        0x0a => "EXP",
        0x0b => "SIGNEXTEND",
        0x10 => "LT",
        0x11 => "GT",
        0x12 => "SLT",
        0x13 => "SGT",
        0x14 => "EQ",
        0x15 => "ISZERO",
        0x16 => "AND",
        0x17 => "OR",
        0x18 => "XOR",
        0x19 => "NOT",
        0x1a => "BYTE",
        0x1b => "SHL",
        0x1c => "SHR",
        0x1d => "SAR",
        0x20 => "KECCAK256",
        0x30 => "ADDRESS",
        0x31 => "BALANCE",
        0x32 => "ORIGIN",
        0x33 => "CALLER",
        0x34 => "CALLVALUE",
        0x35 => "CALLDATALOAD",
        0x36 => "CALLDATASIZE",
        0x37 => "CALLDATACOPY",
        0x38 => "CODESIZE",
        0x39 => "CODECOPY",
        0x3a => "GASPRICE",
        0x3b => "EXTCODESIZE",
        0x3c => "EXTCODECOPY",
        0x3d => "RETURNDATASIZE",
        0x3e => "RETURNDATACOPY",
        0x3f => "EXTCODEHASH",
        0x40 => "BLOCKHASH",
        0x41 => "COINBASE",
        0x42 => "TIMESTAMP",
        0x43 => "NUMBER",
        0x44 => "PREVRANDAO",
        0x45 => "GASLIMIT",
        0x46 => "CHAINID",
        0x47 => "SELFBALANCE",
        0x48 => "BASEFEE",
        0x49 => "BLOBHASH",
        0x4a => "BLOBBASEFEE",
        0x50 => "POP",
        0x51 => "MLOAD",
        0x52 => "MSTORE",
        0x53 => "MSTORE8",
        0x54 => "SLOAD",
        0x55 => "SSTORE",
        0x56 => "JUMP",
        0x57 => "JUMPI",
        0x58 => "PC",
        0x59 => "MSIZE",
        0x5a => "GAS",
        0x5b => "JUMPDEST",
        0x5c => "TLOAD",
        0x5d => "TSTORE",
        0x5e => "MCOPY",
        PUSH0 => "PUSH0",
        0x60..=0x7f => return Cow::Owned(format!("PUSH{}", opcode - 0x5f)),
        0x80..=0x8f => return Cow::Owned(format!("DUP{}", opcode - 0x7f)),
        0x90..=0x9f => return Cow::Owned(format!("SWAP{}", opcode - 0x8f)),
        0xa0..=0xa4 => return Cow::Owned(format!("LOG{}", opcode - 0xa0)),
        0xf0 => "CREATE",
        0xf1 => "CALL",
        0xf2 => "CALLCODE",
        0xf3 => "RETURN",
        0xf4 => "DELEGATECALL",
        0xf5 => "CREATE2",
        0xfa => "STATICCALL",
        0xfd => "REVERT",
        0xfe => "INVALID",
        0xff => "SELFDESTRUCT",
        other => return Cow::Owned(format!("UNKNOWN_0x{:02x}", other)),
    };
    Cow::Borrowed(name)
}
