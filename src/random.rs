// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Random identifiers and one-time codes from the system CSPRNG.

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};

const ID_BYTES: usize = 12;
const CODE_SPACE: u32 = 1_000_000;

fn fill(buf: &mut [u8]) -> Result<(), AppError> {
    SystemRandom::new()
        .fill(buf)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))
}

/// New opaque document id (24 lowercase hex chars).
pub fn new_id() -> Result<String, AppError> {
    let mut buf = [0u8; ID_BYTES];
    fill(&mut buf)?;
    Ok(hex::encode(buf))
}

/// Six-digit numeric code, uniform over `000000..=999999`.
pub fn six_digit_code() -> Result<String, AppError> {
    // Largest multiple of CODE_SPACE that fits; draws above it are rejected
    // so every residue is equally likely.
    let zone = (u32::MAX / CODE_SPACE) * CODE_SPACE;
    loop {
        let mut buf = [0u8; 4];
        fill(&mut buf)?;
        let draw = u32::from_le_bytes(buf);
        if draw < zone {
            return Ok(format!("{:06}", draw % CODE_SPACE));
        }
    }
}
