//! Control requests from other tasks
//!
//! The controller itself is single threaded. Hosts that receive requests on
//! another task or in an interrupt (network, input pins) push them into an
//! [`IntentChannel`]; the controller drains it on its own thread before each
//! frame. The queue is guarded by a critical section and backed by a
//! fixed-size `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::{color::Rgb, config::WarmConfig};

/// Already debounced event from a physical input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// One detent clockwise, brightness up
    RotateClockwise,
    /// One detent counter-clockwise, brightness down
    RotateCounterClockwise,
    /// Button press, next mode
    Press,
}

/// Request to change the light configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightIntent {
    /// Switch mode by ordinal
    SetMode(u8),
    SetStaticColor(Rgb),
    SetBrightness(u8),
    SetWarmConfig(WarmConfig),
    Input(InputEvent),
}

/// Returned when the channel is full, carries the rejected intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFull(pub LightIntent);

/// Bounded multi-producer queue of [`LightIntent`]s
pub struct IntentChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<LightIntent, SIZE>>>,
}

impl<const SIZE: usize> Default for IntentChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> IntentChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> IntentSender<'_, SIZE> {
        IntentSender { channel: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_, SIZE> {
        IntentReceiver { channel: self }
    }

    fn push(&self, intent: LightIntent) -> Result<(), ChannelFull> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(intent)
                .map_err(ChannelFull)
        })
    }

    fn pop(&self) -> Option<LightIntent> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }
}

/// Producer handle of an [`IntentChannel`]
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentSender<'_, SIZE> {
    /// Queue an intent without blocking
    pub fn try_send(&self, intent: LightIntent) -> Result<(), ChannelFull> {
        self.channel.push(intent)
    }
}

/// Consumer handle of an [`IntentChannel`]
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentReceiver<'_, SIZE> {
    /// Take the oldest queued intent, `None` if the queue is empty
    pub fn try_receive(&self) -> Option<LightIntent> {
        self.channel.pop()
    }
}
