/// One accepted spelling of an enumerated parameter.
///
/// `mnemonic` is what goes on the wire; `aliases` are friendlier names
/// accepted on input, e.g. `leftpeak` for `LPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub mnemonic: &'static str,
    pub aliases: &'static [&'static str],
}

impl Choice {
    pub fn matches(&self, s: &str) -> bool {
        let s = s.trim();
        self.mnemonic.eq_ignore_ascii_case(s) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(s))
    }
}

/// Finds the choice `s` names, ignoring case.
pub fn find(choices: &'static [Choice], s: &str) -> Option<&'static Choice> {
    choices.iter().find(|c| c.matches(s))
}

/// `one of MLOG, PHAS, GDEL` style listing for error messages.
pub fn describe(choices: &[Choice]) -> String {
    let names = choices.iter().map(|c| c.mnemonic).collect::<Vec<_>>();
    format!("one of {}", names.join(", "))
}

/// Declares an enumerated SCPI parameter.
///
/// ```ignore
/// scpi_enum! {
///     pub enum TriggerScope("trigger scope") {
///         Active => "ACT" | "active",
///         All => "ALL",
///     }
/// }
/// ```
///
/// The enum gets `ALL`, `CHOICES`, `mnemonic()`, `Display`, a
/// case-insensitive `FromStr` failing with `Error::InvalidArgument`,
/// `From<_> for Value` and `FromResponse`.
macro_rules! scpi_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($parameter:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $mnemonic:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const CHOICES: &'static [$crate::scpi::Choice] = &[
                $($crate::scpi::Choice { mnemonic: $mnemonic, aliases: &[$($alias),*] }),+
            ];

            pub fn mnemonic(self) -> &'static str {
                match self {
                    $($name::$variant => $mnemonic,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.mnemonic())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Error;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .zip(Self::CHOICES)
                    .find(|(_, choice)| choice.matches(s))
                    .map(|(variant, _)| *variant)
                    .ok_or_else(|| {
                        $crate::error::Error::invalid_argument(
                            $parameter,
                            s,
                            $crate::scpi::describe(Self::CHOICES),
                        )
                    })
            }
        }

        impl ::std::convert::From<$name> for $crate::scpi::Value {
            fn from(v: $name) -> Self {
                $crate::scpi::Value::Text(v.mnemonic().to_string())
            }
        }

        impl $crate::scpi::FromResponse for $name {
            const EXPECTED: &'static str = concat!($parameter, " mnemonic");
            fn from_response(response: &str) -> ::std::option::Option<Self> {
                response.trim().trim_matches('"').parse().ok()
            }
        }
    };
}

pub(crate) use scpi_enum;
