//! Prepared SQL statement

pub mod bind;
pub mod cols;
pub mod rows;

use libc::c_void;
use std::ptr;

use self::bind::Binds;
use self::cols::Columns;
pub use self::rows::{Row, Rows};

use crate::env::Env;
use crate::oci::*;
use crate::{Connection, Error, Result, Value};

/// A prepared SQL or PL/SQL statement.
pub struct Statement<'s> {
    conn: &'s Connection<'s>,
    stmt: Ptr<OCIStmt>,
    err: Handle<OCIError>,
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        if !self.stmt.is_null() {
            unsafe {
                OCIStmtRelease(self.stmt.get(), self.err.get(), ptr::null(), 0, OCI_DEFAULT);
            }
        }
    }
}

impl Env for Statement<'_> {
    fn env_ptr(&self) -> *mut OCIEnv {
        self.conn.env_ptr()
    }

    fn err_ptr(&self) -> *mut OCIError {
        self.err.get()
    }
}

impl<'s> Statement<'s> {
    pub(crate) fn new(sql: &str, conn: &'s Connection<'s>) -> Result<Self> {
        let err = Handle::<OCIError>::new(conn.env_ptr())?;
        let mut stmt = Ptr::<OCIStmt>::null();
        catch! {err.get() =>
            OCIStmtPrepare2(
                conn.svc_ptr(), stmt.as_mut_ptr(), err.get(),
                sql.as_ptr(), sql.len() as u32,
                ptr::null(), 0,
                OCI_NTV_SYNTAX, OCI_DEFAULT
            )
        }
        Ok(Self { conn, stmt, err })
    }

    pub(crate) fn conn(&self) -> &Connection<'s> {
        self.conn
    }

    pub(crate) fn stmt_ptr(&self) -> *mut OCIStmt {
        self.stmt.get()
    }

    fn get_attr<V: attr::AttrVal>(&self, attr_type: u32) -> Result<V> {
        attr::get(attr_type, self.stmt.get() as *const c_void, OCI_HTYPE_STMT, self.err.get())
    }

    fn set_attr<V: attr::AttrVal>(&self, attr_type: u32, attr_val: V) -> Result<()> {
        attr::set(attr_type, attr_val, self.stmt.get() as *mut c_void, OCI_HTYPE_STMT, self.err.get())
    }

    /// Number of parameter placeholders in the statement text.
    pub fn param_count(&self) -> Result<usize> {
        let num: u32 = self.get_attr(OCI_ATTR_BIND_COUNT)?;
        Ok(num as usize)
    }

    /// Rows processed by the most recent execution.
    pub fn row_count(&self) -> Result<usize> {
        let num: u64 = self.get_attr(OCI_ATTR_UB8_ROW_COUNT)?;
        Ok(num as usize)
    }

    fn stmt_type(&self) -> Result<u16> {
        self.get_attr(OCI_ATTR_STMT_TYPE)
    }

    fn set_prefetch(&self) -> Result<()> {
        let (prefetch_rows, prefetch_memory) = self.conn.session_attrs();
        self.set_attr(OCI_ATTR_PREFETCH_ROWS, prefetch_rows)?;
        if prefetch_memory > 0 {
            self.set_attr(OCI_ATTR_PREFETCH_MEMORY, prefetch_memory)?;
        }
        Ok(())
    }

    /// Issues the native execute call and hands back the raw status so
    /// the caller can release the binds before acting on it.
    fn exec_raw(&self, iters: u32) -> i32 {
        let mode = if self.conn.in_transaction() { OCI_DEFAULT } else { OCI_COMMIT_ON_SUCCESS };
        unsafe {
            OCIStmtExecute(
                self.conn.svc_ptr(), self.stmt.get(), self.err.get(),
                iters, 0, ptr::null(), ptr::null_mut(), mode
            )
        }
    }

    /**
        Executes a non-SELECT statement. Returns the number of affected
        rows.

        Arguments are bound positionally to `:0`, `:1`, ... in order.
        Every buffer and descriptor acquired for the binds is released
        when the call returns, whether it succeeded or not.

        # Example
        ```no_run
        # let oracle = oci8::env()?;
        # let conn = oracle.connect("scott:tiger@localhost:1521/XE")?;
        let stmt = conn.prepare("UPDATE emp SET sal = sal * 1.1 WHERE deptno = :0")?;
        let updated = stmt.execute(&[oci8::Value::Int(30)])?;
        # Ok::<(),oci8::Error>(())
        ```
    */
    pub fn execute(&self, args: &[Value]) -> Result<usize> {
        if self.stmt_type()? == OCI_STMT_SELECT {
            return Err(Error::new("use query to execute SELECT"));
        }
        let binds = Binds::bind_args(self, args)?;
        let res = self.exec_raw(1);
        // Bound buffers, timestamp descriptors and temporary LOBs are
        // execution-scoped; they go away before the status is examined.
        drop(binds);
        match res {
            OCI_SUCCESS | OCI_SUCCESS_WITH_INFO => self.row_count(),
            _ => Err(Error::oci(self.err.get(), res)),
        }
    }

    /**
        Executes a SELECT. Returns the set of resulting rows.

        # Example
        ```no_run
        # let oracle = oci8::env()?;
        # let conn = oracle.connect("scott:tiger@localhost:1521/XE")?;
        let stmt = conn.prepare("SELECT ename, sal FROM emp WHERE deptno = :0")?;
        let mut rows = stmt.query(&[oci8::Value::Int(30)])?;
        while let Some(row) = rows.next()? {
            println!("{:?} earns {:?}", row.get(0), row.get(1));
        }
        # Ok::<(),oci8::Error>(())
        ```
    */
    pub fn query(&self, args: &[Value]) -> Result<Rows> {
        if self.stmt_type()? != OCI_STMT_SELECT {
            return Err(Error::new("use execute for statements other than SELECT"));
        }
        self.set_prefetch()?;
        let binds = Binds::bind_args(self, args)?;
        let res = self.exec_raw(0);
        drop(binds);
        match res {
            OCI_SUCCESS | OCI_SUCCESS_WITH_INFO | OCI_NO_DATA => {}
            _ => return Err(Error::oci(self.err.get(), res)),
        }
        let cols = Columns::describe(self)?;
        Ok(Rows::new(self, cols, res == OCI_NO_DATA))
    }
}
