//! Actors and their erased form.
//!
//! An [`Actor`] performs an action whose type is fixed by the implementor. [`AnyActor<A>`] erases the concrete actor
//! but keeps the action type `A` as part of its own type: actors sharing the same action type can be stored together,
//! actors with different action types cannot.

use std::{any::type_name, fmt, rc::Rc};
use tracing::trace;

/// Something that can act, given an action of type [`Actor::Action`].
pub trait Actor {
  type Action;

  fn act(&self, action: Self::Action);
}

/// Erased actor for actions of type `A`.
///
/// # Examples
///
/// Actors of different concrete types performing the same kind of action can be stored together:
///
/// ```
/// use erasure::{Actor, AnyActor};
///
/// struct Swim;
///
/// struct Toad;
///
/// impl Actor for Toad {
///   type Action = Swim;
///
///   fn act(&self, _: Swim) {
///     println!("i can swim");
///   }
/// }
///
/// struct Cheep;
///
/// impl Actor for Cheep {
///   type Action = Swim;
///
///   fn act(&self, _: Swim) {
///     println!("blub");
///   }
/// }
///
/// let swimmers = vec![AnyActor::new(Toad), AnyActor::new(Cheep)];
///
/// for swimmer in &swimmers {
///   swimmer.attack(Swim);
/// }
/// ```
///
/// The action type is not erased, so a swimmer and a flyer cannot end up in the same collection:
///
/// ```compile_fail
/// use erasure::{Actor, AnyActor};
///
/// struct Swim;
/// struct Fly;
///
/// struct Toad;
///
/// impl Actor for Toad {
///   type Action = Swim;
///
///   fn act(&self, _: Swim) {}
/// }
///
/// struct Birdo;
///
/// impl Actor for Birdo {
///   type Action = Fly;
///
///   fn act(&self, _: Fly) {}
/// }
///
/// // error: mismatched types, expected `AnyActor<'_, Swim>`, found `AnyActor<'_, Fly>`
/// let actors = vec![AnyActor::new(Toad), AnyActor::new(Birdo)];
/// ```
pub struct AnyActor<'a, A> {
  act: Rc<dyn Fn(A) + 'a>,
}

impl<'a, A> AnyActor<'a, A> {
  /// Erase an actor by moving it into the wrapper.
  pub fn new<M>(actor: M) -> Self
  where
    M: Actor<Action = A> + 'a,
  {
    Self::from_fn(move |action| actor.act(action))
  }

  /// Erase a borrowed actor.
  pub fn borrowed<M>(actor: &'a M) -> Self
  where
    M: Actor<Action = A>,
  {
    Self::from_fn(move |action| actor.act(action))
  }

  /// Bind any unary function taking an `A`.
  pub fn from_fn(act: impl Fn(A) + 'a) -> Self {
    Self { act: Rc::new(act) }
  }

  /// Perform `action` with the bound function, exactly once.
  pub fn attack(&self, action: A) {
    trace!(action = type_name::<A>(), "attack");
    (self.act)(action)
  }
}

impl<A> Clone for AnyActor<'_, A> {
  fn clone(&self) -> Self {
    Self {
      act: self.act.clone(),
    }
  }
}

impl<A> fmt::Debug for AnyActor<'_, A> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("AnyActor")
      .field("action", &type_name::<A>())
      .finish_non_exhaustive()
  }
}

impl<A> Actor for AnyActor<'_, A> {
  type Action = A;

  fn act(&self, action: A) {
    self.attack(action)
  }
}
