//! Registry of node types that may reference each other before definition.
//!
//! Building happens in two phases:
//! 1. **Collect**: `register` stores declarations in an arena and interns
//!    their names. References stay unresolved.
//! 2. **Resolve**: `finish` resolves every reference, binds derived types to
//!    their bases and sorts derived lists by name. The result is stored
//!    beside the declarations, which are never patched.
//!
//! Queries that depend on resolution fail with `Error::NotFinished` until
//! `finish` succeeded.

use log::{debug, trace};
use nodegen_core::{Interner, Symbol};

use crate::model::{TypeDef, TypeId, TypeRef};
use crate::{Error, Result};

/// Owns all node type declarations of one schema.
///
/// Only `register` interns names, so a type's `Symbol` and its `TypeId`
/// share the same index.
#[derive(Debug, Default)]
pub struct Registry {
    names: Interner,
    defs: Vec<TypeDef>,
    resolution: Option<Resolution>,
}

/// Output of `finish`, indexed by `TypeId`.
#[derive(Debug)]
struct Resolution {
    bases: Vec<Option<TypeId>>,
    derived: Vec<Vec<TypeId>>,
    /// Per type, per member: the referenced node type of child members.
    targets: Vec<Vec<Option<TypeId>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under its name.
    pub fn register(&mut self, def: TypeDef) -> Result<TypeId> {
        if self.resolution.is_some() {
            return Err(Error::RegistryFinished { name: def.name });
        }
        if self.names.lookup(&def.name).is_some() {
            return Err(Error::DuplicateName {
                namespace: "type",
                name: def.name,
            });
        }
        check_member_names(&def)?;

        let id = type_id(self.names.intern(&def.name));
        debug_assert_eq!(id.index(), self.defs.len());
        trace!("registered type `{}` as #{}", def.name, id.as_u32());
        self.defs.push(def);
        Ok(id)
    }

    /// Register several types, failing on the first duplicate.
    pub fn register_all(&mut self, defs: impl IntoIterator<Item = TypeDef>) -> Result<Vec<TypeId>> {
        defs.into_iter().map(|def| self.register(def)).collect()
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Result<&TypeDef> {
        self.id(name).map(|id| self.def(id))
    }

    /// Look up a type id by name.
    pub fn id(&self, name: &str) -> Result<TypeId> {
        self.names
            .lookup(name)
            .map(type_id)
            .ok_or_else(|| Error::UnknownType {
                name: name.to_string(),
                referenced_by: None,
            })
    }

    /// Declaration of a registered type.
    ///
    /// # Panics
    /// Panics if the id was not handed out by this registry.
    #[inline]
    pub fn def(&self, id: TypeId) -> &TypeDef {
        &self.defs[id.index()]
    }

    #[inline]
    pub fn name(&self, id: TypeId) -> &str {
        self.names.resolve(Symbol::from_raw(id.as_u32()))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// All types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId::from_raw(i as u32), def))
    }

    pub fn is_finished(&self) -> bool {
        self.resolution.is_some()
    }

    /// Resolve references, bind base types and sort derived lists.
    ///
    /// Calling `finish` on a finished registry does nothing. On error the
    /// registry stays unfinished and nothing is recorded.
    pub fn finish(&mut self) -> Result<()> {
        if self.resolution.is_some() {
            debug!("type registry already finished, skipping");
            return Ok(());
        }

        let resolution = self.resolve()?;
        debug!(
            "type registry finished: {} types, {} with a base",
            self.defs.len(),
            resolution.bases.iter().filter(|b| b.is_some()).count()
        );
        self.resolution = Some(resolution);
        Ok(())
    }

    fn resolve(&self) -> Result<Resolution> {
        let mut bases = Vec::with_capacity(self.defs.len());
        let mut targets = Vec::with_capacity(self.defs.len());

        for def in &self.defs {
            let base = match &def.base {
                Some(r) => Some(self.resolve_ref(r, &def.name)?),
                None => None,
            };
            bases.push(base);

            let member_targets = def
                .members
                .iter()
                .map(|m| match m.kind.node_target() {
                    Some(r) => self.resolve_ref(r, &def.name).map(Some),
                    None => Ok(None),
                })
                .collect::<Result<Vec<_>>>()?;
            targets.push(member_targets);
        }

        let mut derived: Vec<Vec<TypeId>> = vec![Vec::new(); self.defs.len()];
        for (i, base) in bases.iter().enumerate() {
            let Some(base) = *base else {
                continue;
            };
            let base_def = self.def(base);
            if base_def.is_final {
                return Err(Error::FinalDerivation {
                    base: base_def.name.clone(),
                    derived: self.defs[i].name.clone(),
                });
            }
            derived[base.index()].push(TypeId::from_raw(i as u32));
        }

        self.check_acyclic(&bases)?;

        for children in &mut derived {
            children.sort_by(|a, b| self.name(*a).cmp(self.name(*b)));
        }

        Ok(Resolution {
            bases,
            derived,
            targets,
        })
    }

    fn resolve_ref(&self, r: &TypeRef, referenced_by: &str) -> Result<TypeId> {
        match r {
            TypeRef::Name(name) => self.id(name).map_err(|_| Error::UnknownType {
                name: name.clone(),
                referenced_by: Some(referenced_by.to_string()),
            }),
            TypeRef::Id(id) if id.index() < self.defs.len() => Ok(*id),
            TypeRef::Id(_) => Err(Error::UnknownType {
                name: r.to_string(),
                referenced_by: Some(referenced_by.to_string()),
            }),
        }
    }

    /// Base chains must end at a type without a base.
    fn check_acyclic(&self, bases: &[Option<TypeId>]) -> Result<()> {
        // 0 = unvisited, 1 = on current chain, 2 = known to terminate
        let mut state = vec![0u8; bases.len()];
        for start in 0..bases.len() {
            let mut chain = Vec::new();
            let mut current = Some(start);
            while let Some(i) = current {
                match state[i] {
                    2 => break,
                    1 => {
                        return Err(Error::InheritanceCycle {
                            name: self.defs[i].name.clone(),
                        });
                    }
                    _ => {}
                }
                state[i] = 1;
                chain.push(i);
                current = bases[i].map(TypeId::index);
            }
            for i in chain {
                state[i] = 2;
            }
        }
        Ok(())
    }

    fn resolution(&self, id: TypeId) -> Result<&Resolution> {
        self.resolution.as_ref().ok_or_else(|| Error::NotFinished {
            name: self.name(id).to_string(),
        })
    }

    /// Resolved base type.
    pub fn base(&self, id: TypeId) -> Result<Option<TypeId>> {
        Ok(self.resolution(id)?.bases[id.index()])
    }

    /// Direct derived types, sorted by name.
    pub fn derived(&self, id: TypeId) -> Result<&[TypeId]> {
        Ok(&self.resolution(id)?.derived[id.index()])
    }

    /// Resolved node type of the member at `index`, `None` for data members.
    pub fn member_target(&self, id: TypeId, index: usize) -> Result<Option<TypeId>> {
        let targets = &self.resolution(id)?.targets[id.index()];
        Ok(targets.get(index).copied().flatten())
    }

    /// Whether `id` is `ancestor` or transitively derives from it.
    pub fn is_subtype(&self, id: TypeId, ancestor: TypeId) -> Result<bool> {
        let mut current = Some(id);
        while let Some(ty) = current {
            if ty == ancestor {
                return Ok(true);
            }
            current = self.base(ty)?;
        }
        Ok(false)
    }
}

fn type_id(sym: Symbol) -> TypeId {
    TypeId::from_raw(sym.as_u32())
}

fn check_member_names(def: &TypeDef) -> Result<()> {
    for (i, member) in def.members.iter().enumerate() {
        if def.members[..i].iter().any(|m| m.name == member.name) {
            return Err(Error::DuplicateMember {
                owner: def.name.clone(),
                member: member.name.clone(),
            });
        }
    }
    Ok(())
}
