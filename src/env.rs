//! OCI environment

use once_cell::sync::OnceCell;
use std::ptr;

use crate::oci::*;
use crate::{Connection, Dsn, Error, Result};

/// Context shared by everything that issues OCI calls: the environment
/// handle the object was created under and the error handle to report
/// through.
pub(crate) trait Env {
    fn env_ptr(&self) -> *mut OCIEnv;
    fn err_ptr(&self) -> *mut OCIError;
}

/// An OCI environment. Everything else in this crate lives within one.
pub struct Environment {
    env: Handle<OCIEnv>,
    err: Handle<OCIError>,
}

impl Env for Environment {
    fn env_ptr(&self) -> *mut OCIEnv {
        self.env.get()
    }

    fn err_ptr(&self) -> *mut OCIError {
        self.err.get()
    }
}

impl Environment {
    /**
        Creates a new OCI environment in threaded mode with an AL32UTF8
        client-side character set.

        Most applications need a single environment; see [`env()`] for
        the process-wide one.
    */
    pub fn new() -> Result<Self> {
        let mut env = Ptr::<OCIEnv>::null();
        let res = unsafe {
            OCIEnvNlsCreate(
                env.as_mut_ptr(), OCI_OBJECT | OCI_THREADED,
                ptr::null(), ptr::null(), ptr::null(), ptr::null(), 0, ptr::null(),
                AL32UTF8, UTF8
            )
        };
        if res != OCI_SUCCESS || env.is_null() {
            return Err(Error::new("cannot create OCI environment"));
        }
        let env = Handle::from(env);
        let err = Handle::<OCIError>::new(env.get())?;
        Ok(Self { env, err })
    }

    /**
        Logs on to the database described by a connection string:

        ```text
        user[:password]@host[:port]/service[?loc=...&prefetch_rows=...]
        ```

        # Example
        ```no_run
        let oracle = oci8::env()?;
        let conn = oracle.connect("scott:tiger@localhost:1521/XE")?;
        # Ok::<(),oci8::Error>(())
        ```
    */
    pub fn connect(&self, dsn: &str) -> Result<Connection> {
        let mut dsn = Dsn::parse(dsn)?;
        dsn.apply_env_overrides();
        self.connect_with(&dsn)
    }

    /// Logs on with an already parsed [`Dsn`].
    pub fn connect_with(&self, dsn: &Dsn) -> Result<Connection> {
        Connection::logon(self, dsn)
    }
}

/**
    Returns the process-wide OCI environment, creating it on first use.

    The underlying client library expects its global state to be set up
    once per process; this accessor guards that with an init-once cell.

    # Example
    ```no_run
    let oracle = oci8::env()?;
    let conn = oracle.connect("scott:tiger@localhost:1521/XE")?;
    # Ok::<(),oci8::Error>(())
    ```
*/
pub fn env() -> Result<&'static Environment> {
    static OCI_ENV: OnceCell<Environment> = OnceCell::new();
    OCI_ENV.get_or_try_init(Environment::new)
}
