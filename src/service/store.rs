//! # Persistence Store
//!
//! The relational store is external; the codec only needs to run parameterized
//! statements and commit them.

use crate::error::{constants, ProtocolError, Result};
use std::fmt;

/// A bound statement parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    UInt(u64),
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::UInt(v) => write!(f, "{v}"),
            SqlValue::Text(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        SqlValue::UInt(v)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        SqlValue::UInt(u64::from(v))
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        SqlValue::UInt(u64::from(v))
    }
}

impl From<usize> for SqlValue {
    fn from(v: usize) -> Self {
        SqlValue::UInt(v as u64)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

/// Statement text with `%s` placeholders and its parameters, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: &'static str, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    /// Number of `%s` placeholders in the text
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches("%s").count()
    }
}

/// Execute-and-commit access to the relational store
pub trait Store {
    fn execute(&mut self, statement: &Statement) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
}

/// Store that buffers statements in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    pending: Vec<Statement>,
    committed: Vec<Statement>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements executed since the last commit
    pub fn pending(&self) -> &[Statement] {
        &self.pending
    }

    /// Statements made durable by `commit`, in execution order
    pub fn committed(&self) -> &[Statement] {
        &self.committed
    }

    /// Reject every further call
    pub fn close(&mut self) {
        self.closed = true;
        self.pending.clear();
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(ProtocolError::Store(constants::ERR_STORE_CLOSED.to_string()));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn execute(&mut self, statement: &Statement) -> Result<()> {
        self.check_open()?;
        if statement.placeholder_count() != statement.params.len() {
            return Err(ProtocolError::Store(format!(
                "statement expects {} parameters, got {}",
                statement.placeholder_count(),
                statement.params.len()
            )));
        }
        self.pending.push(statement.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.check_open()?;
        self.committed.append(&mut self.pending);
        Ok(())
    }
}
