pub mod handle;
pub mod path;
pub mod registry;

pub use handle::{ClassHandle, FunctionHandle, MethodHandle, Receiver};
pub use path::TargetPath;
pub use registry::{Module, Registry, ResolveError, ResolvedTarget};
