//! Running a lexer on its own thread.
//!
//! [`Lexer::spawn`] moves the engine to a dedicated producer thread that
//! hands tokens to a [`TokenReceiver`] through a single slot. The producer
//! lexes one token ahead and then blocks until the slot is free, so at most
//! one token is ever waiting for the consumer. Tokens arrive in the order
//! the state functions published them.

use std::{
    io::Read,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use log::debug;
use parking_lot::{Condvar, Mutex};

use crate::{LexError, Lexer, Token};

#[derive(Debug, Default)]
struct Slot {
    token: Option<Token>,
    /// The producer is gone, nothing will be put in the slot anymore.
    finished: bool,
    /// The receiver is gone, the producer should stop.
    closed: bool,
    /// The producer exited by panicking and the consumer has not been told.
    panicked: bool,
}

#[derive(Debug, Default)]
struct Shared {
    slot: Mutex<Slot>,
    changed: Condvar,
}

/// Marks the slot finished when the producer exits, including by panic.
struct FinishOnDrop<'a>(&'a Shared);

impl Drop for FinishOnDrop<'_> {
    fn drop(&mut self) {
        let mut slot = self.0.slot.lock();
        slot.finished = true;
        if thread::panicking() {
            debug!("lexer thread panicked");
            slot.panicked = true;
        }
        drop(slot);
        self.0.changed.notify_all();
    }
}

impl Slot {
    /// What a consumer gets once the producer is gone: one error token if
    /// it crashed, end of stream after that.
    fn after_finish(&mut self) -> Token {
        if self.panicked {
            self.panicked = false;
            return Token::error(LexError::custom("lexer thread panicked"));
        }
        Token::error(LexError::Eof)
    }
}

impl Shared {
    fn produce<R: Read>(&self, mut lexer: Lexer<R>) {
        let _finish = FinishOnDrop(self);
        debug!("lexer thread started");
        loop {
            let token = lexer.next_token();
            let last = token.is_eof();

            let mut slot = self.slot.lock();
            while slot.token.is_some() && !slot.closed {
                self.changed.wait(&mut slot);
            }
            if slot.closed {
                debug!("receiver dropped, lexer thread stopping");
                return;
            }
            slot.token = Some(token);
            drop(slot);
            self.changed.notify_all();

            if last {
                debug!("lexer thread reached end of stream");
                return;
            }
        }
    }
}

impl<R: Read + Send + 'static> Lexer<R> {
    /// Move the lexer onto a new thread and return the consuming end.
    pub fn spawn(self) -> TokenReceiver {
        let shared = Arc::new(Shared::default());
        let producer = Arc::clone(&shared);
        thread::spawn(move || producer.produce(self));
        TokenReceiver {
            shared,
            emitted_eof: false,
        }
    }
}

/// Consuming end of a spawned lexer.
///
/// Dropping it stops the producer after the token it is working on.
#[derive(Debug)]
pub struct TokenReceiver {
    shared: Arc<Shared>,
    emitted_eof: bool,
}

impl TokenReceiver {
    /// Block until the next token is available.
    ///
    /// Once the producer has finished this returns an end-of-stream token
    /// forever, like [`Lexer::next_token`] on a halted lexer. If a state
    /// function panicked on the producer thread, a
    /// [`LexError::Custom`] error token comes first.
    pub fn recv(&mut self) -> Token {
        let mut slot = self.shared.slot.lock();
        loop {
            if let Some(token) = slot.token.take() {
                drop(slot);
                self.shared.changed.notify_all();
                return token;
            }
            if slot.finished {
                return slot.after_finish();
            }
            self.shared.changed.wait(&mut slot);
        }
    }

    /// Like [`TokenReceiver::recv`], giving up after `timeout`.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<Token> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.shared.slot.lock();
        loop {
            if let Some(token) = slot.token.take() {
                drop(slot);
                self.shared.changed.notify_all();
                return Some(token);
            }
            if slot.finished {
                return Some(slot.after_finish());
            }
            if self
                .shared
                .changed
                .wait_until(&mut slot, deadline)
                .timed_out()
            {
                return None;
            }
        }
    }

    /// Take the pending token without blocking.
    pub fn try_recv(&mut self) -> Option<Token> {
        let token = self.shared.slot.lock().token.take();
        if token.is_some() {
            self.shared.changed.notify_all();
        }
        token
    }

    /// Whether the producer thread has exited.
    pub fn is_finished(&self) -> bool {
        self.shared.slot.lock().finished
    }
}

/// Yields every token up to and including the first end-of-stream token.
impl Iterator for TokenReceiver {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.recv();
        if token.is_eof() {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

impl Drop for TokenReceiver {
    fn drop(&mut self) {
        self.shared.slot.lock().closed = true;
        self.shared.changed.notify_all();
    }
}
