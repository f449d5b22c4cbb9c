/// Declares a `mod` and uses it.
///
/// ## Examples
/// ``` ignore
/// using!{
///   pub mod1,
///   pub(crate) mod2,
///   mod3
/// }
/// ```
/// Expands to:
/// ``` ignore
/// mod mod1;
/// pub use self::mod1::*;
/// mod mod2;
/// pub(crate) use self::mod2::*;
/// mod mod3;
/// use self::name::*;
/// ```
#[macro_export]
macro_rules! using {
    ($($v:vis $p:ident),*) => {
        $(
            mod $p;
            $v use self::$p::*;
        )*
    }
}

/// Builds a boxed [Error](crate::error::Error) from an error code and an optional formatted reason.
///
/// ## Examples
/// ``` ignore
/// return Err(err!(PaginationErrorCode::PageInvalidCursor));
/// return Err(err!(AuthErrorCode::AuthMissing, "No subject for {operation}"));
/// ```
#[macro_export]
macro_rules! err {
    ($code:expr) => {
        $crate::error::Error::from(($code,)).boxed()
    };
    ($code:expr, $($reason:tt)+) => {
        $crate::error::Error::from(($code, format!($($reason)+))).boxed()
    };
}
