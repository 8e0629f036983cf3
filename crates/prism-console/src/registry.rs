//! Command registry: the set of live descriptors.

use std::cell::RefCell;
use std::rc::Rc;

use prism_types::error::{PrismError, Result};

use crate::command::CommandDescriptor;

/// Registry of live command descriptors.
///
/// Registration order is preserved and observable: dispatch scans overload
/// sets in this order and autocomplete lists candidates in this order.
/// Interior mutability lets command callbacks re-enter through a shared
/// `Rc` handle while a dispatch is in flight; every lookup hands out a
/// snapshot so iteration never crosses a mutation.
#[derive(Default)]
pub struct CommandRegistry {
    entries: RefCell<Vec<Rc<CommandDescriptor>>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Register a new descriptor. Fails on a duplicate `(id, arity)` pair.
    pub fn register(&self, descriptor: CommandDescriptor) -> Result<()> {
        self.insert(descriptor, false)
    }

    /// Register, replacing an existing non-native `(id, arity)` entry.
    pub fn register_override(&self, descriptor: CommandDescriptor) -> Result<()> {
        self.insert(descriptor, true)
    }

    fn insert(&self, descriptor: CommandDescriptor, overwrite: bool) -> Result<()> {
        if descriptor.id.is_empty() || descriptor.id.contains(char::is_whitespace) {
            return Err(PrismError::InvalidId(descriptor.id));
        }
        let mut entries = self.entries.borrow_mut();
        let arity = descriptor.arity();
        let existing = entries
            .iter()
            .position(|e| e.id == descriptor.id && e.arity() == arity);
        match existing {
            Some(pos) => {
                if !overwrite {
                    log::warn!(
                        "duplicate command registration refused: {}/{arity}",
                        descriptor.id
                    );
                    return Err(PrismError::DuplicateCommand {
                        id: descriptor.id,
                        arity,
                    });
                }
                if entries[pos].native {
                    return Err(PrismError::NativeProtected(descriptor.id));
                }
                // Replaced in place: iteration position is preserved.
                entries[pos] = Rc::new(descriptor);
                Ok(())
            },
            None => {
                entries.push(Rc::new(descriptor));
                Ok(())
            },
        }
    }

    /// Remove a command.
    ///
    /// With `arity` given, only the exact `(id, arity)` entry is considered;
    /// otherwise the first entry with a matching id regardless of arity.
    /// A native match is refused and nothing is removed.
    pub fn remove(&self, id: &str, arity: Option<usize>) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        let pos = entries
            .iter()
            .position(|e| e.id == id && arity.is_none_or(|a| e.arity() == a));
        match pos {
            Some(pos) => {
                if entries[pos].native {
                    return Err(PrismError::NativeProtected(id.to_string()));
                }
                entries.remove(pos);
                Ok(())
            },
            None => Err(PrismError::UnknownCommand(id.to_string())),
        }
    }

    /// The overload set for `(id, arity)`, in registration order.
    ///
    /// Returns a snapshot: the dispatcher iterates it while callbacks may
    /// mutate the registry underneath.
    pub fn overloads(&self, id: &str, arity: usize) -> Vec<Rc<CommandDescriptor>> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.id == id && e.arity() == arity)
            .map(Rc::clone)
            .collect()
    }

    /// Every descriptor in registration order (snapshot).
    pub fn all(&self) -> Vec<Rc<CommandDescriptor>> {
        self.entries.borrow().iter().map(Rc::clone).collect()
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandSignature, TypeTag};

    fn descriptor(id: &str, signature: CommandSignature) -> CommandDescriptor {
        CommandDescriptor::new(id, format!("{id} description"), signature, |_| Ok(()))
    }

    #[test]
    fn register_then_lookup_roundtrip() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("jump", CommandSignature::Nullary))
            .unwrap();
        let set = reg.overloads("jump", 0);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].id, "jump");
    }

    #[test]
    fn duplicate_registration_refused() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("x", CommandSignature::Nullary))
            .unwrap();
        let err = reg
            .register(descriptor("x", CommandSignature::Nullary))
            .unwrap_err();
        assert!(matches!(err, PrismError::DuplicateCommand { .. }));
        assert_eq!(reg.overloads("x", 0).len(), 1);
    }

    #[test]
    fn same_id_different_arity_is_not_a_duplicate() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("x", CommandSignature::Nullary))
            .unwrap();
        reg.register(descriptor("x", CommandSignature::Unary(TypeTag::Int)))
            .unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn overload_set_keeps_registration_order() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("x", CommandSignature::Unary(TypeTag::Float)))
            .unwrap();
        reg.register(descriptor("y", CommandSignature::Nullary))
            .unwrap();
        // Same (id, arity), different signature: a permitted overload.
        let second =
            CommandDescriptor::new("x", "second", CommandSignature::Unary(TypeTag::Str), |_| {
                Ok(())
            });
        reg.register(second).unwrap();
        let set = reg.overloads("x", 1);
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].signature, CommandSignature::Unary(TypeTag::Float));
        assert_eq!(set[1].signature, CommandSignature::Unary(TypeTag::Str));
    }

    #[test]
    fn override_replaces_in_place() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("a", CommandSignature::Nullary))
            .unwrap();
        reg.register(descriptor("b", CommandSignature::Nullary))
            .unwrap();
        reg.register(descriptor("c", CommandSignature::Nullary))
            .unwrap();
        let replacement =
            CommandDescriptor::new("b", "replaced", CommandSignature::Nullary, |_| Ok(()));
        reg.register_override(replacement).unwrap();
        let all = reg.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].id, "b");
        assert_eq!(all[1].description, "replaced");
    }

    #[test]
    fn override_of_native_refused() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("h", CommandSignature::Nullary).native())
            .unwrap();
        let err = reg
            .register_override(descriptor("h", CommandSignature::Nullary))
            .unwrap_err();
        assert!(matches!(err, PrismError::NativeProtected(_)));
        assert_eq!(reg.overloads("h", 0)[0].description, "h description");
    }

    #[test]
    fn remove_exact_arity_only() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("x", CommandSignature::Nullary))
            .unwrap();
        reg.register(descriptor("x", CommandSignature::Unary(TypeTag::Int)))
            .unwrap();
        reg.remove("x", Some(1)).unwrap();
        assert_eq!(reg.overloads("x", 0).len(), 1);
        assert!(reg.overloads("x", 1).is_empty());
    }

    #[test]
    fn remove_without_arity_takes_first_match() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("x", CommandSignature::Nullary))
            .unwrap();
        reg.register(descriptor("x", CommandSignature::Unary(TypeTag::Int)))
            .unwrap();
        reg.remove("x", None).unwrap();
        assert!(reg.overloads("x", 0).is_empty());
        assert_eq!(reg.overloads("x", 1).len(), 1);
    }

    #[test]
    fn remove_native_refused_and_descriptor_retained() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("h", CommandSignature::Nullary).native())
            .unwrap();
        let err = reg.remove("h", None).unwrap_err();
        assert!(matches!(err, PrismError::NativeProtected(_)));
        assert_eq!(reg.overloads("h", 0).len(), 1);
    }

    #[test]
    fn remove_unknown_reports_error() {
        let reg = CommandRegistry::new();
        let err = reg.remove("missing", None).unwrap_err();
        assert!(matches!(err, PrismError::UnknownCommand(_)));
    }

    #[test]
    fn empty_id_refused() {
        let reg = CommandRegistry::new();
        let err = reg
            .register(descriptor("", CommandSignature::Nullary))
            .unwrap_err();
        assert!(matches!(err, PrismError::InvalidId(_)));
        assert!(reg.is_empty());
    }

    #[test]
    fn whitespace_in_id_refused() {
        let reg = CommandRegistry::new();
        for id in ["has space", "tab\there", "nl\nhere"] {
            let err = reg
                .register(descriptor(id, CommandSignature::Nullary))
                .unwrap_err();
            assert!(matches!(err, PrismError::InvalidId(_)));
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn all_returns_registration_order() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("zebra", CommandSignature::Nullary))
            .unwrap();
        reg.register(descriptor("alpha", CommandSignature::Nullary))
            .unwrap();
        let all = reg.all();
        assert_eq!(all[0].id, "zebra");
        assert_eq!(all[1].id, "alpha");
    }

    #[test]
    fn overloads_for_unused_arity_is_empty() {
        let reg = CommandRegistry::new();
        reg.register(descriptor("x", CommandSignature::Nullary))
            .unwrap();
        assert!(reg.overloads("x", 2).is_empty());
        assert!(reg.overloads("x", 3).is_empty());
    }
}
