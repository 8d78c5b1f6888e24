// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-action typed param parsing. `Step::validate` already checked
//! these keys exist with the right coarse type at parse time; these
//! helpers do the final narrowing (`i64` -> `u16`, `String` -> `IpAddr`)
//! an executor needs right before building a `ChangeSet`.

use ntn_core::ValidationError;
use ntn_scenario::{ParamMap, ParamValue};

pub fn required_str<'a>(params: &'a ParamMap, key: &str) -> Result<&'a str, ValidationError> {
    params.get(key).and_then(ParamValue::as_str).ok_or_else(|| ValidationError::single(format!("missing param {key:?}")))
}

pub fn optional_str<'a>(params: &'a ParamMap, key: &str) -> Option<&'a str> {
    params.get(key).and_then(ParamValue::as_str)
}

pub fn required_i64(params: &ParamMap, key: &str) -> Result<i64, ValidationError> {
    params.get(key).and_then(ParamValue::as_i64).ok_or_else(|| ValidationError::single(format!("missing param {key:?}")))
}

pub fn optional_i64(params: &ParamMap, key: &str) -> Option<i64> {
    params.get(key).and_then(ParamValue::as_i64)
}

pub fn required_u16(params: &ParamMap, key: &str) -> Result<u16, ValidationError> {
    let v = required_i64(params, key)?;
    u16::try_from(v).map_err(|_| ValidationError::single(format!("param {key:?} out of range for u16: {v}")))
}

pub fn required_u32(params: &ParamMap, key: &str) -> Result<u32, ValidationError> {
    let v = required_i64(params, key)?;
    u32::try_from(v).map_err(|_| ValidationError::single(format!("param {key:?} out of range for u32: {v}")))
}

pub fn optional_u32(params: &ParamMap, key: &str) -> Result<Option<u32>, ValidationError> {
    match optional_i64(params, key) {
        None => Ok(None),
        Some(v) => u32::try_from(v).map(Some).map_err(|_| ValidationError::single(format!("param {key:?} out of range for u32: {v}"))),
    }
}

pub fn optional_u8(params: &ParamMap, key: &str) -> Result<Option<u8>, ValidationError> {
    match optional_i64(params, key) {
        None => Ok(None),
        Some(v) => u8::try_from(v).map(Some).map_err(|_| ValidationError::single(format!("param {key:?} out of range for u8: {v}"))),
    }
}

pub fn optional_f64(params: &ParamMap, key: &str) -> Option<f64> {
    params.get(key).and_then(ParamValue::as_f64)
}

pub fn required_bool(params: &ParamMap, key: &str, default: bool) -> bool {
    params.get(key).and_then(ParamValue::as_bool).unwrap_or(default)
}

pub fn required_ip(params: &ParamMap, key: &str) -> Result<std::net::IpAddr, ValidationError> {
    let s = required_str(params, key)?;
    s.parse().map_err(|_| ValidationError::single(format!("param {key:?} is not a valid IP address: {s}")))
}

pub fn required_str_list(params: &ParamMap, key: &str) -> Result<Vec<String>, ValidationError> {
    params.get(key).and_then(ParamValue::as_str_list).ok_or_else(|| ValidationError::single(format!("missing param {key:?}")))
}
