/// A deferred invocation against a target state.
///
/// [Reversible](crate::operation::Reversible) uses a pair of [Action] objects,
/// one to revert a change and one to re-apply it.
/// An [Action] does not hold the state it changes;
/// the target is lent to [invoke](Action::invoke) each time.
///
/// Note that [invoke](Action::invoke) may be called many times over a sequence of
/// undo and redo, so it must perform the same call each time.
///
/// Example
/// ```
/// # use lur::action::Action;
/// struct Push(i32);
///
/// impl Action for Push {
///     type Target = Vec<i32>;
///     type Error = std::convert::Infallible;
///     fn invoke(&self, target: &mut Self::Target) -> Result<(), Self::Error> {
///         target.push(self.0);
///         Ok(())
///     }
/// }
/// ```
pub trait Action {
    type Target;
    type Error;
    fn invoke(&self, target: &mut Self::Target) -> Result<(), Self::Error>;
}

/// A boxed [Action] owned by a [Reversible](crate::operation::Reversible).
pub type BoundAction<'a, T, E> = Box<dyn Action<Target = T, Error = E> + 'a>;

/// An operation bound to a fixed argument list.
///
/// The arguments are captured at construction and never re-evaluated.
/// Each [invoke](Action::invoke) passes a fresh clone of them to the operation,
/// so every invocation performs exactly the same call.
///
/// Example
/// ```
/// # use lur::action::{Action, Bound};
/// fn insert(v: &mut Vec<i32>, (at, n): (usize, i32)) -> Result<(), String> {
///     if v.len() < at {
///         return Err(format!("index {} out of range", at));
///     }
///     v.insert(at, n);
///     Ok(())
/// }
///
/// let action = Bound::new(insert, (0, 7));
/// let mut v = vec![1, 2];
/// action.invoke(&mut v).unwrap();
/// assert_eq!(vec![7, 1, 2], v);
/// ```
pub struct Bound<T, A, E> {
    op: fn(&mut T, A) -> Result<(), E>,
    args: A,
}

impl<T, A: Clone, E> Bound<T, A, E> {
    pub fn new(op: fn(&mut T, A) -> Result<(), E>, args: A) -> Self {
        Self { op, args }
    }

    /// The captured arguments.
    pub fn args(&self) -> &A {
        &self.args
    }
}

impl<T, A: Clone, E> Action for Bound<T, A, E> {
    type Target = T;
    type Error = E;
    fn invoke(&self, target: &mut T) -> Result<(), E> {
        (self.op)(target, self.args.clone())
    }
}

impl<T, A: std::fmt::Debug, E> std::fmt::Debug for Bound<T, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bound").field("args", &self.args).finish()
    }
}

/// An [Action] made from a closure.
///
/// Useful when the inverse of a change is easier to write inline than as a named function.
pub struct FnAction<F, T, E> {
    f: F,
    _phantom: std::marker::PhantomData<fn(&mut T) -> E>,
}

impl<F, T, E> FnAction<F, T, E>
where
    F: Fn(&mut T) -> Result<(), E>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<F, T, E> Action for FnAction<F, T, E>
where
    F: Fn(&mut T) -> Result<(), E>,
{
    type Target = T;
    type Error = E;
    fn invoke(&self, target: &mut T) -> Result<(), E> {
        (self.f)(target)
    }
}

/// Binds `op` to `args` and boxes the result.
pub fn bind<'a, T: 'a, A: Clone + 'a, E: 'a>(
    op: fn(&mut T, A) -> Result<(), E>,
    args: A,
) -> BoundAction<'a, T, E> {
    Box::new(Bound::new(op, args))
}

/// Boxes a closure as an action.
pub fn from_fn<'a, T: 'a, E: 'a, F>(f: F) -> BoundAction<'a, T, E>
where
    F: Fn(&mut T) -> Result<(), E> + 'a,
{
    Box::new(FnAction::new(f))
}
