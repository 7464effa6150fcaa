//! Request-scoped principal attachment.
//!
//! The principal is stored in the request's [`http::Extensions`] under a
//! private slot type. Extensions are keyed by type, and the slot type is not
//! exported, so no other crate can set or read the principal except through
//! [`attach`] and [`retrieve`].
//!
//! [`retrieve`] panics when nothing was attached. Reaching a handler that
//! needs a principal without passing through authentication is a wiring bug.

use crate::identity::Principal;
use http::Extensions;
use std::sync::Arc;

/// Slot holding the attached principal.
#[derive(Clone)]
struct PrincipalSlot(Arc<Principal>);

/// A per-request value that can carry a principal.
///
/// Implemented for [`http::Request`] and [`http::request::Parts`]; the
/// extraction context in `herald-extract` implements it too.
pub trait ScopedCarrier {
    /// Read access to the request extensions.
    fn extensions(&self) -> &Extensions;

    /// Write access to the request extensions.
    fn extensions_mut(&mut self) -> &mut Extensions;
}

impl<B> ScopedCarrier for http::Request<B> {
    fn extensions(&self) -> &Extensions {
        http::Request::extensions(self)
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        http::Request::extensions_mut(self)
    }
}

impl ScopedCarrier for http::request::Parts {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Attaches the principal and hands the carrier back.
///
/// A second attach replaces the first.
///
/// # Example
///
/// ```
/// use herald_core::{context, Principal};
///
/// let req = http::Request::new(());
/// let req = context::attach(req, Principal::anonymous());
/// assert!(context::retrieve(&req).is_anonymous());
/// ```
#[must_use]
pub fn attach<C: ScopedCarrier>(mut carrier: C, principal: Principal) -> C {
    carrier
        .extensions_mut()
        .insert(PrincipalSlot(Arc::new(principal)));
    carrier
}

/// Returns the attached principal.
///
/// # Panics
///
/// Panics if [`attach`] was never called on this carrier.
pub fn retrieve<C: ScopedCarrier>(carrier: &C) -> &Principal {
    match carrier.extensions().get::<PrincipalSlot>() {
        Some(slot) => &slot.0,
        None => panic!("missing principal value in request context"),
    }
}
