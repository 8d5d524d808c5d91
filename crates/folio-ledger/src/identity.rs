// crates/folio-ledger/src/identity.rs
//
// Identity registry: public-key bindings per principal.
//
// Principals register their own identity. Verification, revocation and
// overwrites require the `IdentityVerifier` role. Signature checks are pure
// and delegate to the configured `SignatureVerifier`.

use folio_core::error::FolioError;
use folio_core::identity::Identity;
use folio_core::principal::Principal;
use folio_core::traits::SignatureVerifier;
use folio_core::Hash32;

use crate::access::Role;
use crate::events::LedgerEvent;
use crate::state::LedgerState;

pub fn register_identity(
    state: &mut LedgerState,
    caller: Principal,
    public_key_hash: Hash32,
    metadata_locator: &str,
) -> Result<(), FolioError> {
    if state.identities.contains_key(&caller) {
        return Err(FolioError::AlreadyRegistered(caller));
    }

    state.identities.insert(
        caller,
        Identity {
            principal: caller,
            public_key_hash,
            metadata_locator: metadata_locator.to_string(),
            verified: false,
            registered_at: state.now,
        },
    );
    state.emit(LedgerEvent::IdentityRegistered { principal: caller });
    tracing::info!("Identity registered for {}", caller.short());
    Ok(())
}

fn identity_mut<'a>(state: &'a mut LedgerState, target: &Principal) -> Result<&'a mut Identity, FolioError> {
    state
        .identities
        .get_mut(target)
        .ok_or(FolioError::NotRegistered(*target))
}

pub fn verify_identity(state: &mut LedgerState, caller: Principal, target: Principal) -> Result<(), FolioError> {
    state.roles.require(&caller, Role::IdentityVerifier)?;
    identity_mut(state, &target)?.verified = true;

    state.emit(LedgerEvent::IdentityVerified { principal: target });
    tracing::info!("Identity {} verified by {}", target.short(), caller.short());
    Ok(())
}

pub fn revoke_identity(state: &mut LedgerState, caller: Principal, target: Principal) -> Result<(), FolioError> {
    state.roles.require(&caller, Role::IdentityVerifier)?;
    identity_mut(state, &target)?.verified = false;

    state.emit(LedgerEvent::IdentityRevoked { principal: target });
    tracing::info!("Identity {} revoked by {}", target.short(), caller.short());
    Ok(())
}

/// Overwrite the key binding and locator of `target`.
///
/// A changed key takes `verified` from the flag. An unchanged key keeps an
/// existing verification and can only be upgraded by the flag.
pub fn set_identity(
    state: &mut LedgerState,
    caller: Principal,
    target: Principal,
    public_key_hash: Hash32,
    metadata_locator: &str,
    verified: bool,
) -> Result<(), FolioError> {
    state.roles.require(&caller, Role::IdentityVerifier)?;
    let identity = identity_mut(state, &target)?;

    identity.verified = if identity.public_key_hash != public_key_hash {
        verified
    } else {
        identity.verified || verified
    };
    identity.public_key_hash = public_key_hash;
    identity.metadata_locator = metadata_locator.to_string();
    let verified = identity.verified;

    state.emit(LedgerEvent::IdentityUpdated {
        principal: target,
        verified,
    });
    tracing::info!(
        "Identity {} updated by {} (verified: {})",
        target.short(),
        caller.short(),
        verified
    );
    Ok(())
}

/// Whether `signature` over `message_hash` was produced by `caller`.
///
/// Malformed keys or signatures yield `false`.
pub fn verify_signature(
    verifier: &dyn SignatureVerifier,
    caller: &Principal,
    message_hash: &Hash32,
    signature: &[u8],
) -> bool {
    match verifier.signed_by(caller, message_hash, signature) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::debug!("Rejected signature for {}: {}", caller.short(), e);
            false
        }
    }
}

pub fn get_identity<'a>(state: &'a LedgerState, principal: &Principal) -> Option<&'a Identity> {
    state.identities.get(principal)
}
