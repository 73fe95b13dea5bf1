// Growth policy for the per-frame and per-action buffers

use std::collections::TryReserveError;

/// Initial capacity of a touch event buffer
pub const MIN_TOUCH_CAPACITY: usize = 4;

/// Initial capacity of an action's binding list
pub const MIN_BINDING_CAPACITY: usize = 2;

#[cfg(test)]
thread_local! {
    static FAIL_NEXT_GROWTH: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

/// Make the next growth on this thread fail as if the allocator refused it
#[cfg(test)]
pub(crate) fn fail_next_growth() {
    FAIL_NEXT_GROWTH.with(|flag| flag.set(true));
}

#[cfg(test)]
fn growth_refused() -> bool {
    FAIL_NEXT_GROWTH.with(|flag| flag.replace(false))
}

#[cfg(not(test))]
fn growth_refused() -> bool {
    false
}

/// Make room for one more element in `buffer`.
///
/// When the buffer is full its capacity doubles (or becomes `min_capacity`
/// if nothing was allocated yet). On failure the buffer is left untouched.
pub fn reserve_for_push<T>(
    buffer: &mut Vec<T>,
    min_capacity: usize,
) -> Result<(), TryReserveError> {
    if buffer.len() < buffer.capacity() {
        return Ok(());
    }

    let target = if buffer.capacity() == 0 {
        min_capacity.max(1)
    } else {
        buffer.capacity().saturating_mul(2)
    };

    if growth_refused() {
        return Vec::<u8>::new().try_reserve_exact(usize::MAX);
    }

    buffer.try_reserve_exact(target - buffer.len())
}

/// Push `value`, growing geometrically. The value is dropped if growth fails.
pub fn try_push<T>(
    buffer: &mut Vec<T>,
    value: T,
    min_capacity: usize,
) -> Result<(), TryReserveError> {
    reserve_for_push(buffer, min_capacity)?;
    buffer.push(value);
    Ok(())
}
