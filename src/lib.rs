/*!
An OCI-based Oracle database driver with a dynamically-typed parameter
and row value interface.

Statements take their arguments as a slice of [`Value`]s bound to
positional placeholders (`:0`, `:1`, ...), and fetched rows come back as
owned [`Value`]s. The crate's job is the marshalling in between: binding
host values into the client library's wire representations, shaping the
output buffers each result column needs, and decoding fetched buffers
back, releasing every native descriptor and locator it allocates along
the way.

```no_run
use oci8::Value;

let oracle = oci8::env()?;
let conn = oracle.connect("scott:tiger@localhost:1521/XE?loc=UTC")?;

let stmt = conn.prepare("SELECT ename, hiredate FROM emp WHERE deptno = :0")?;
let mut rows = stmt.query(&[Value::Int(30)])?;
while let Some(row) = rows.next()? {
    println!("{} hired {}", row[0], row[1]);
}
# Ok::<(),oci8::Error>(())
```
*/

#[macro_use]
mod err;
mod oci;
mod env;
mod dsn;
mod conn;
mod stmt;
mod lob;
mod types;

pub use conn::Connection;
pub use dsn::Dsn;
pub use env::{env, Environment};
pub use err::Error;
pub use stmt::{Row, Rows, Statement};
pub use types::{Timestamp, Value, Zone};

pub type Result<T> = std::result::Result<T, Error>;
