//! Database connection

use parking_lot::RwLock;
use std::cell::Cell;

use crate::env::Env;
use crate::oci::*;
use crate::types::Zone;
use crate::{Dsn, Environment, Result, Statement};

/// Session attributes applied to every executed statement.
pub(crate) struct SessionAttrs {
    pub(crate) prefetch_rows: u32,
    pub(crate) prefetch_memory: u32,
}

/// A logged-on database session.
///
/// A connection supports one in-flight operation at a time; the OCI
/// handles it owns are never shared.
pub struct Connection<'a> {
    env: &'a Environment,
    svc: Ptr<OCISvcCtx>,
    err: Handle<OCIError>,
    location: Zone,
    attrs: RwLock<SessionAttrs>,
    in_txn: Cell<bool>,
}

impl Env for Connection<'_> {
    fn env_ptr(&self) -> *mut OCIEnv {
        self.env.env_ptr()
    }

    fn err_ptr(&self) -> *mut OCIError {
        self.err.get()
    }
}

impl Drop for Connection<'_> {
    fn drop(&mut self) {
        if !self.svc.is_null() {
            unsafe {
                OCILogoff(self.svc.get(), self.err.get());
            }
        }
    }
}

impl<'a> Connection<'a> {
    pub(crate) fn logon(env: &'a Environment, dsn: &Dsn) -> Result<Self> {
        let err = Handle::<OCIError>::new(env.env_ptr())?;
        let db = dsn.connect_string();
        let mut svc = Ptr::<OCISvcCtx>::null();
        catch! {err.get() =>
            OCILogon(
                env.env_ptr(), err.get(), svc.as_mut_ptr(),
                dsn.username.as_ptr(), dsn.username.len() as u32,
                dsn.password.as_ptr(), dsn.password.len() as u32,
                db.as_ptr(), db.len() as u32
            )
        }
        Ok(Self {
            env,
            svc,
            err,
            location: dsn.location.clone(),
            attrs: RwLock::new(SessionAttrs {
                prefetch_rows: dsn.prefetch_rows,
                prefetch_memory: dsn.prefetch_memory,
            }),
            in_txn: Cell::new(false),
        })
    }

    pub(crate) fn svc_ptr(&self) -> *mut OCISvcCtx {
        self.svc.get()
    }

    /// Zone attached to fetched date-time values that carry no zone of
    /// their own.
    pub(crate) fn location(&self) -> &Zone {
        &self.location
    }

    pub(crate) fn in_transaction(&self) -> bool {
        self.in_txn.get()
    }

    pub(crate) fn session_attrs(&self) -> (u32, u32) {
        let attrs = self.attrs.read();
        (attrs.prefetch_rows, attrs.prefetch_memory)
    }

    /**
        Prepares a SQL statement for execution.

        Parameter placeholders are positional: `:0`, `:1`, ... bound
        1:1, in order, from the argument slice given to `execute` or
        `query`.

        # Example
        ```no_run
        # let oracle = oci8::env()?;
        # let conn = oracle.connect("scott:tiger@localhost:1521/XE")?;
        let stmt = conn.prepare("SELECT ename FROM emp WHERE empno = :0")?;
        # Ok::<(),oci8::Error>(())
        ```
    */
    pub fn prepare(&self, sql: &str) -> Result<Statement> {
        Statement::new(sql, self)
    }

    /// Starts an explicit transaction. Until `commit` or `rollback`,
    /// executed statements no longer auto-commit.
    pub fn begin(&self) -> Result<()> {
        catch! {self.err_ptr() =>
            OCITransStart(self.svc.get(), self.err.get(), 60, OCI_TRANS_READWRITE)
        }
        self.in_txn.set(true);
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        self.in_txn.set(false);
        catch! {self.err_ptr() =>
            OCITransCommit(self.svc.get(), self.err.get(), OCI_DEFAULT)
        }
        Ok(())
    }

    pub fn rollback(&self) -> Result<()> {
        self.in_txn.set(false);
        catch! {self.err_ptr() =>
            OCITransRollback(self.svc.get(), self.err.get(), OCI_DEFAULT)
        }
        Ok(())
    }

    /// Sets the number of rows prefetched by queries on this connection.
    pub fn set_prefetch_rows(&self, num_rows: u32) {
        self.attrs.write().prefetch_rows = num_rows;
    }

    /// Caps the memory used by row prefetch; zero leaves it to the row
    /// limit alone.
    pub fn set_prefetch_memory(&self, memory: u32) {
        self.attrs.write().prefetch_memory = memory;
    }
}
