//! Call-site identification
//!
//! Every message is prefixed with the name of the function that logged it.
//! The name is captured at compile time by [`call_site!`](crate::call_site),
//! which expands to a [`CallSite`] holding `module_path!()` and the
//! enclosing function's type path.

use std::fmt;

/// Where a log call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    module: &'static str,
    function: &'static str,
}

impl CallSite {
    /// `function` is the full path of the enclosing function, as produced
    /// by `std::any::type_name` on a nested item (see `call_site!`).
    pub const fn new(module: &'static str, function: &'static str) -> Self {
        Self { module, function }
    }

    /// A call site whose function could not be resolved; its label is empty.
    pub const fn unknown() -> Self {
        Self {
            module: "",
            function: "",
        }
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    /// Bare name of the calling function, or `""` when unresolved.
    pub fn function_name(&self) -> &'static str {
        resolve_function_name(self.function)
    }

    /// The `"<name>: "` prefix put in front of every message.
    pub fn label(&self) -> String {
        let name = self.function_name();
        if name.is_empty() {
            String::new()
        } else {
            format!("{}: ", name)
        }
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Reduce a function path to its last meaningful segment.
///
/// `my_app::server::handle::{{closure}}` resolves to `handle`; generic
/// arguments such as `run<T>` are cut at the first `<`.
pub fn resolve_function_name(path: &'static str) -> &'static str {
    path.rsplit("::")
        .filter(|segment| !segment.is_empty() && !segment.starts_with("{{"))
        .map(|segment| segment.split('<').next().unwrap_or(segment))
        .find(|name| !name.is_empty())
        .unwrap_or("")
}

/// Capture the current module and enclosing function as a [`CallSite`].
///
/// ```
/// use leveled_logger::call_site;
///
/// fn load_config() -> &'static str {
///     call_site!().function_name()
/// }
///
/// assert_eq!(load_config(), "load_config");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __type_name_of(__here);
        $crate::core::CallSite::new(
            module_path!(),
            path.strip_suffix("::__here").unwrap_or(path),
        )
    }};
}
