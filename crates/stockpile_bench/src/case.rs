// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The catalog of benchmark cases.

use std::fmt;

/// The storage operation a case exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Existence checks.
    Has,
    /// Unconditional writes.
    Set,
    /// Writes of absent keys.
    Add,
    /// Writes of present keys.
    Replace,
    /// Token reads followed by conditional writes.
    GetCheckAndSet,
    /// Expiry refreshes.
    Touch,
    /// Reads.
    Get,
    /// Deletions.
    Remove,
}

/// Which fixture a case works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The warm items, present after setup.
    Existing,
    /// The cold items, absent after teardown.
    Missing,
}

/// Whether a case issues one call per item or one call for all items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One storage call per item.
    Single,
    /// One storage call for the whole fixture.
    Bulk,
}

macro_rules! cases {
    ($($variant:ident => $name:literal, $operation:ident, $target:ident, $shape:ident;)*) => {
        /// A single benchmark case: an operation, the fixture it targets, and its shape.
        ///
        /// Add is only measured against missing items and replace only against existing
        /// ones, since the opposite combinations are no-ops in every adapter. The
        /// get-check-and-set sequence has no bulk form.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Case {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl Case {
            /// Every case, in catalog order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the snake case name used as the benchmark id.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Returns the operation this case measures.
            #[must_use]
            pub const fn operation(self) -> Operation {
                match self {
                    $(Self::$variant => Operation::$operation,)*
                }
            }

            /// Returns the fixture this case works on.
            #[must_use]
            pub const fn target(self) -> Target {
                match self {
                    $(Self::$variant => Target::$target,)*
                }
            }

            /// Returns whether this case issues single or bulk calls.
            #[must_use]
            pub const fn shape(self) -> Shape {
                match self {
                    $(Self::$variant => Shape::$shape,)*
                }
            }
        }
    };
}

cases! {
    HasMissingItemsSingle => "has_missing_items_single", Has, Missing, Single;
    HasMissingItemsBulk => "has_missing_items_bulk", Has, Missing, Bulk;
    HasExistingItemsSingle => "has_existing_items_single", Has, Existing, Single;
    HasExistingItemsBulk => "has_existing_items_bulk", Has, Existing, Bulk;
    SetMissingItemsSingle => "set_missing_items_single", Set, Missing, Single;
    SetMissingItemsBulk => "set_missing_items_bulk", Set, Missing, Bulk;
    SetExistingItemsSingle => "set_existing_items_single", Set, Existing, Single;
    SetExistingItemsBulk => "set_existing_items_bulk", Set, Existing, Bulk;
    AddItemsSingle => "add_items_single", Add, Missing, Single;
    AddItemsBulk => "add_items_bulk", Add, Missing, Bulk;
    ReplaceItemsSingle => "replace_items_single", Replace, Existing, Single;
    ReplaceItemsBulk => "replace_items_bulk", Replace, Existing, Bulk;
    GetCheckAndSetItemsSingle => "get_check_and_set_items_single", GetCheckAndSet, Existing, Single;
    TouchMissingItemsSingle => "touch_missing_items_single", Touch, Missing, Single;
    TouchMissingItemsBulk => "touch_missing_items_bulk", Touch, Missing, Bulk;
    TouchExistingItemsSingle => "touch_existing_items_single", Touch, Existing, Single;
    TouchExistingItemsBulk => "touch_existing_items_bulk", Touch, Existing, Bulk;
    GetMissingItemsSingle => "get_missing_items_single", Get, Missing, Single;
    GetMissingItemsBulk => "get_missing_items_bulk", Get, Missing, Bulk;
    GetExistingItemsSingle => "get_existing_items_single", Get, Existing, Single;
    GetExistingItemsBulk => "get_existing_items_bulk", Get, Existing, Bulk;
    RemoveMissingItemsSingle => "remove_missing_items_single", Remove, Missing, Single;
    RemoveMissingItemsBulk => "remove_missing_items_bulk", Remove, Missing, Bulk;
    RemoveExistingItemsSingle => "remove_existing_items_single", Remove, Existing, Single;
    RemoveExistingItemsBulk => "remove_existing_items_bulk", Remove, Existing, Bulk;
}

impl Case {
    /// Returns the case with the same operation and target but the other shape, if the
    /// catalog has one.
    #[must_use]
    pub fn counterpart(self) -> Option<Self> {
        Self::ALL.iter().copied().find(|other| {
            other.operation() == self.operation() && other.target() == self.target() && other.shape() != self.shape()
        })
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_every_case_once() {
        assert_eq!(Case::ALL.len(), 25);
        let names: HashSet<_> = Case::ALL.iter().map(|case| case.name()).collect();
        assert_eq!(names.len(), Case::ALL.len());
    }

    #[test]
    fn add_and_replace_target_one_fixture() {
        for case in Case::ALL {
            match case.operation() {
                Operation::Add => assert_eq!(case.target(), Target::Missing, "{case}"),
                Operation::Replace | Operation::GetCheckAndSet => {
                    assert_eq!(case.target(), Target::Existing, "{case}");
                }
                _ => {}
            }
        }
    }

    #[test]
    fn only_check_and_set_lacks_a_bulk_form() {
        let unpaired: Vec<_> = Case::ALL.iter().filter(|case| case.counterpart().is_none()).collect();
        assert_eq!(unpaired, [&Case::GetCheckAndSetItemsSingle]);
        assert_eq!(Case::GetCheckAndSetItemsSingle.shape(), Shape::Single);
    }

    #[test]
    fn counterpart_swaps_shape() {
        assert_eq!(Case::SetExistingItemsSingle.counterpart(), Some(Case::SetExistingItemsBulk));
        assert_eq!(Case::RemoveMissingItemsBulk.counterpart(), Some(Case::RemoveMissingItemsSingle));
    }

    #[test]
    fn name_matches_display() {
        assert_eq!(Case::TouchExistingItemsBulk.to_string(), "touch_existing_items_bulk");
        assert_eq!(Case::GetCheckAndSetItemsSingle.name(), "get_check_and_set_items_single");
    }
}
