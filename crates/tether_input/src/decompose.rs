//! Motion event decomposer
//!
//! Expands one batched platform notification into an ordered [`InputBatch`]
//! of atomic, source-tagged events. Output order is fully determined by the
//! input: pointers in platform order, samples oldest first, axes in the
//! order the source tracks them.

use tether_core::{
    AtomicInputEvent, BridgeError, ControllerSource, InputBatch, JoystickMotion, MotionAction,
    MotionSource, Result,
};

use crate::inventory::GamepadAxisSet;

/// Decompose a touch or generic motion event
///
/// Move events emit every pointer; pointer-class sources yield positional
/// samples and joystick-class sources yield one event per tracked axis.
/// Every other action emits only the pointer at the action index.
pub fn decompose<M: MotionSource + ?Sized>(
    event: &M,
    tap_count: u8,
    axes: &GamepadAxisSet,
) -> Result<InputBatch> {
    let action = event.action();
    let source = event.source();
    let mut batch = InputBatch::new(action);

    if action == MotionAction::Move {
        let joystick = JoystickMotion::new(event, axes.as_slice());
        for index in 0..event.pointer_count() {
            if source.is_pointer() {
                push_pointer_samples(event, index, tap_count, &mut batch);
            }
            if source.is_joystick() {
                push_axis_samples(&joystick, index, tap_count, &mut batch);
            }
        }
    } else {
        let index = event.action_index();
        let count = event.pointer_count();
        if index >= count {
            return Err(BridgeError::InvalidPointerIndex { index, count });
        }
        push_pointer_samples(event, index, tap_count, &mut batch);
    }

    Ok(batch)
}

/// Decompose a controller sample; always a joystick move
pub fn decompose_controller<C: ControllerSource + ?Sized>(source: &C) -> InputBatch {
    let mut batch = InputBatch::new(MotionAction::Move);
    for index in 0..source.sample_count() {
        push_axis_samples(source, index, 1, &mut batch);
    }
    batch
}

fn push_pointer_samples<M: MotionSource + ?Sized>(
    event: &M,
    index: usize,
    tap_count: u8,
    batch: &mut InputBatch,
) {
    let pointer = event.pointer_id(index);
    let source = event.source();

    for pos in 0..event.history_size() {
        batch.push(AtomicInputEvent::touch(
            pointer,
            event.historical_x(index, pos),
            event.historical_y(index, pos),
            event.historical_event_time_nanos(pos),
            source,
            tap_count,
        ));
    }

    batch.push(AtomicInputEvent::touch(
        pointer,
        event.x(index),
        event.y(index),
        event.event_time_nanos(),
        source,
        tap_count,
    ));
}

fn push_axis_samples<C: ControllerSource + ?Sized>(
    source: &C,
    index: usize,
    tap_count: u8,
    batch: &mut InputBatch,
) {
    let mask = source.source();

    for pos in 0..source.history_size() {
        let time = source.historical_event_time_nanos(pos);
        for &axis in source.tracked_axes() {
            batch.push(AtomicInputEvent::axis(
                axis,
                source.historical_axis_value(axis, index, pos),
                time,
                mask,
                tap_count,
            ));
        }
    }

    let time = source.event_time_nanos();
    for &axis in source.tracked_axes() {
        batch.push(AtomicInputEvent::axis(
            axis,
            source.axis_value(axis, index),
            time,
            mask,
            tap_count,
        ));
    }
}
