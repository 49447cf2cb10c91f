use crate::{Interner, Symbol};

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("Expr");
    let b = interner.intern("Expr");
    let c = interner.intern("Stmt");

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn resolve_roundtrip() {
    let mut interner = Interner::new();

    let sym = interner.intern("CallExpr");
    assert_eq!(interner.resolve(sym), "CallExpr");
}

#[test]
fn lookup_does_not_intern() {
    let mut interner = Interner::new();
    let sym = interner.intern("Node");

    assert_eq!(interner.lookup("Node"), Some(sym));
    assert_eq!(interner.lookup("Missing"), None);
    assert_eq!(interner.intern("Missing").as_u32(), 1);
}

#[test]
fn symbols_are_dense_insertion_indices() {
    let mut interner = Interner::new();

    let z = interner.intern("Zeta");
    let a = interner.intern("Alpha");

    assert_eq!(z.as_u32(), 0);
    assert_eq!(a.as_u32(), 1);
    assert_eq!(interner.resolve(Symbol::from_raw(1)), "Alpha");
}
