//! Role classification and descriptor validation

use crate::body::{BodyId, SoundBody};
use crate::descriptor::{NodeFactory, Role};
use crate::error::SoundWarning;

/// Bodies partitioned by role, in the order they were scanned.
///
/// A body appears in every list whose role entry it validly declares.
#[derive(Debug)]
pub struct RoleSets<'a, B> {
    /// Bodies with a valid source entry
    pub sources: Vec<&'a B>,
    /// Bodies with a valid transform entry
    pub transforms: Vec<&'a B>,
    /// Bodies with a valid destination entry
    pub destinations: Vec<&'a B>,
}

impl<'a, B> RoleSets<'a, B> {
    fn new() -> Self {
        Self {
            sources: Vec::new(),
            transforms: Vec::new(),
            destinations: Vec::new(),
        }
    }

    /// Bodies of one role
    pub fn get(&self, role: Role) -> &[&'a B] {
        match role {
            Role::Source => &self.sources,
            Role::Transform => &self.transforms,
            Role::Destination => &self.destinations,
        }
    }

    fn get_mut(&mut self, role: Role) -> &mut Vec<&'a B> {
        match role {
            Role::Source => &mut self.sources,
            Role::Transform => &mut self.transforms,
            Role::Destination => &mut self.destinations,
        }
    }

    /// Every classified body once per role, sources then transforms then destinations
    pub fn iter_all(&self) -> impl Iterator<Item = &'a B> + '_ {
        self.sources
            .iter()
            .chain(self.transforms.iter())
            .chain(self.destinations.iter())
            .copied()
    }

    /// Check if no body was classified
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.transforms.is_empty() && self.destinations.is_empty()
    }
}

impl<B: SoundBody> RoleSets<'_, B> {
    /// Ids of one role's bodies
    pub fn ids(&self, role: Role) -> Vec<BodyId> {
        self.get(role).iter().map(|b| b.id()).collect()
    }
}

/// Result of a classification pass
#[derive(Debug)]
pub struct Classification<'a, B> {
    /// Role membership
    pub roles: RoleSets<'a, B>,
    /// Role entries rejected during validation
    pub warnings: Vec<SoundWarning>,
}

/// Check a body's entry for `role`.
///
/// * `None`: the body does not declare the role
/// * `Some(Ok(factory))`: declared with a usable factory
/// * `Some(Err(warning))`: declared without one
pub fn validate_role<B: SoundBody + ?Sized>(
    body: &B,
    role: Role,
) -> Option<Result<&NodeFactory, SoundWarning>> {
    let slot = body.sound()?.factory_slot(role)?;
    Some(slot.factory().ok_or_else(|| SoundWarning::ConfigValidation {
        body: body.id(),
        label: body.label().to_string(),
        role,
        received: slot.describe(),
    }))
}

/// Partition `bodies` into sources, transforms and destinations.
///
/// Rejected role entries are logged and collected; they never stop the scan.
/// Bodies without a descriptor are skipped silently.
pub fn classify<'a, B, I>(bodies: I) -> Classification<'a, B>
where
    B: SoundBody + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let mut roles = RoleSets::new();
    let mut warnings = Vec::new();

    for body in bodies {
        for role in Role::ALL {
            match validate_role(body, role) {
                None => {}
                Some(Ok(_)) => roles.get_mut(role).push(body),
                Some(Err(warning)) => {
                    log::warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }
    }

    Classification { roles, warnings }
}
