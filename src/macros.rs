// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand: s!() is empty, s!(x) is String::from(x)
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate string slices into one owned String
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}
