//! Assertions over a buffered [`ApiResponse`].
//!
//! Every failing check logs the response status and raw body at `error`
//! level before the [`HarnessError::Assertion`] is returned, so a failed
//! scenario can be diagnosed from the log alone.
//!
//! ```ignore
//! let resp = api.list_facts(Some(3)).await?;
//! let check = expect(&resp);
//! check.ok()?.status(200)?;
//! check.json()?.is_array("/data", true)?.has_len("/data", 3)?;
//! ```

use std::fmt::Debug;

use serde_json::Value;
use tracing::error;

use crate::api::model::{json_kind, Envelope};
use crate::errors::{HarnessError, Result};
use crate::http::ApiResponse;

static NULL: Value = Value::Null;

pub fn expect(resp: &ApiResponse) -> Expect<'_> {
    Expect { resp }
}

/// Record a failure against `resp`: log it, then build the error.
fn fail(resp: &ApiResponse, message: String) -> HarnessError {
    let body = resp.text();
    error!(
        status = resp.status(),
        url = %resp.url(),
        body = %body,
        "assertion failed: {message}"
    );
    HarnessError::Assertion {
        message,
        status: resp.status(),
        body,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Expect<'a> {
    resp: &'a ApiResponse,
}

impl<'a> Expect<'a> {
    pub fn response(&self) -> &'a ApiResponse {
        self.resp
    }

    pub fn ok(&self) -> Result<&Self> {
        self.that(self.resp.ok(), || {
            format!("expected a 2xx status, got {}", self.resp.status())
        })
    }

    pub fn not_ok(&self) -> Result<&Self> {
        self.that(!self.resp.ok(), || {
            format!("expected a non-2xx status, got {}", self.resp.status())
        })
    }

    pub fn status(&self, code: u16) -> Result<&Self> {
        self.that(self.resp.status() == code, || {
            format!("expected status {code}, got {}", self.resp.status())
        })
    }

    pub fn that(&self, cond: bool, message: impl FnOnce() -> String) -> Result<&Self> {
        if cond {
            Ok(self)
        } else {
            Err(fail(self.resp, message()))
        }
    }

    /// Build (and log) an assertion failure against this response.
    pub fn fail(&self, message: impl Into<String>) -> HarnessError {
        fail(self.resp, message.into())
    }

    pub fn equals<T: PartialEq + Debug>(&self, what: &str, actual: T, expected: T) -> Result<&Self> {
        self.that(actual == expected, || {
            format!("{what}: expected {expected:?}, got {actual:?}")
        })
    }

    /// Parse the body as JSON. A body that is not JSON is a parse failure,
    /// not an assertion failure, but it is logged the same way.
    pub fn json(&self) -> Result<JsonDoc<'a>> {
        match self.resp.json::<Value>() {
            Ok(value) => Ok(JsonDoc {
                value,
                resp: self.resp,
            }),
            Err(err) => {
                error!(
                    status = self.resp.status(),
                    body = %self.resp.text(),
                    "response body is not JSON: {err}"
                );
                Err(err)
            }
        }
    }
}

impl Expect<'_> {
    /// Typed envelope of the body. A `data` shape that contradicts the
    /// endpoint's cardinality is reported like any other assertion, with
    /// status and body attached.
    pub fn envelope(&self) -> Result<Envelope> {
        match self.resp.envelope() {
            Ok(env) => Ok(env),
            Err(err @ HarnessError::Shape { .. }) => Err(fail(self.resp, err.to_string())),
            Err(err) => {
                error!(
                    status = self.resp.status(),
                    body = %self.resp.text(),
                    "response body is not an envelope: {err}"
                );
                Err(err)
            }
        }
    }
}

/// A parsed body addressed with JSON pointers (`/data/0/type`).
#[derive(Debug, Clone)]
pub struct JsonDoc<'a> {
    value: Value,
    resp: &'a ApiResponse,
}

impl<'a> JsonDoc<'a> {
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Value at `pointer`; missing and `null` both count as undefined.
    pub fn at(&self, pointer: &str) -> Result<&Value> {
        match self.value.pointer(pointer) {
            Some(v) if !v.is_null() => Ok(v),
            _ => Err(fail(self.resp, format!("expected {pointer} to be defined"))),
        }
    }

    pub fn defined(&self, pointer: &str) -> Result<&Self> {
        self.at(pointer)?;
        Ok(self)
    }

    pub fn str_at(&self, pointer: &str) -> Result<&str> {
        let v = self.at(pointer)?;
        v.as_str().ok_or_else(|| {
            fail(
                self.resp,
                format!("expected {pointer} to be a string, got {}", json_kind(v)),
            )
        })
    }

    pub fn array_at(&self, pointer: &str) -> Result<&Vec<Value>> {
        let v = self.at(pointer)?;
        v.as_array().ok_or_else(|| {
            fail(
                self.resp,
                format!("expected {pointer} to be an array, got {}", json_kind(v)),
            )
        })
    }

    pub fn is_array(&self, pointer: &str, expected: bool) -> Result<&Self> {
        let v = self.at(pointer)?;
        if v.is_array() == expected {
            return Ok(self);
        }
        let want = if expected { "an array" } else { "not an array" };
        Err(fail(
            self.resp,
            format!("expected {pointer} to be {want}, got {}", json_kind(v)),
        ))
    }

    pub fn has_len(&self, pointer: &str, n: usize) -> Result<&Self> {
        let len = self.array_at(pointer)?.len();
        if len == n {
            Ok(self)
        } else {
            Err(fail(
                self.resp,
                format!("expected {pointer} to hold {n} elements, got {len}"),
            ))
        }
    }

    pub fn len_greater_than(&self, pointer: &str, n: usize) -> Result<&Self> {
        let len = self.array_at(pointer)?.len();
        if len > n {
            Ok(self)
        } else {
            Err(fail(
                self.resp,
                format!("expected {pointer} to hold more than {n} elements, got {len}"),
            ))
        }
    }

    pub fn equals(&self, pointer: &str, expected: impl Into<Value>) -> Result<&Self> {
        let expected = expected.into();
        let actual = self.value.pointer(pointer).unwrap_or(&NULL);
        if *actual == expected {
            Ok(self)
        } else {
            Err(fail(
                self.resp,
                format!("expected {pointer} == {expected}, got {actual}"),
            ))
        }
    }

    pub fn contains_str(&self, pointer: &str, needle: &str) -> Result<&Self> {
        let s = self.str_at(pointer)?;
        if s.contains(needle) {
            Ok(self)
        } else {
            Err(fail(
                self.resp,
                format!("expected {pointer} ({s:?}) to contain {needle:?}"),
            ))
        }
    }

    /// Check `rel` (a pointer relative to each element) on every element of
    /// the array at `pointer`.
    pub fn every_equals(&self, pointer: &str, rel: &str, expected: impl Into<Value>) -> Result<&Self> {
        let expected = expected.into();
        for i in 0..self.array_at(pointer)?.len() {
            self.equals(&format!("{pointer}/{i}{rel}"), expected.clone())?;
        }
        Ok(self)
    }

    pub fn every_defined(&self, pointer: &str, rel: &str) -> Result<&Self> {
        for i in 0..self.array_at(pointer)?.len() {
            self.defined(&format!("{pointer}/{i}{rel}"))?;
        }
        Ok(self)
    }
}
