//! Background parsing with debounce and generation tracking.
//!
//! The parser chain runs on a dedicated thread and communicates over
//! channels. One parse is meaningful at a time: the worker drains its queue
//! and parses only the newest pending request, and the caller discards any
//! response whose generation is older than the newest one seen. When the
//! thread cannot be spawned, everything runs synchronously in the caller's
//! context instead, which is behaviorally identical.

use std::{
  sync::mpsc::{Receiver, Sender, channel},
  thread,
  time::{Duration, Instant},
};

use inkdown_pipeline::{
  MarkdownOptions,
  MarkdownProcessor,
  RenderResult,
  render_recovering,
};

/// A parse request handed to the worker thread.
struct ParseRequest {
  generation: u64,
  source:     String,
}

/// A completed parse, tagged with the generation of its request.
pub struct ParseResponse {
  pub generation: u64,
  pub result:     Result<RenderResult, String>,
}

/// Handle to the background parse thread.
pub struct ParseWorker {
  requests:    Sender<ParseRequest>,
  responses:   Receiver<ParseResponse>,
  loopback:    Sender<ParseResponse>,
  fallback:    Option<MarkdownProcessor>,
  generation:  u64,
  newest_seen: u64,
}

impl ParseWorker {
  /// Start the worker thread.
  ///
  /// Spawn failure is not fatal: the returned handle then parses
  /// synchronously on submit, logged once here.
  #[must_use]
  pub fn spawn(options: MarkdownOptions) -> Self {
    let (request_tx, request_rx) = channel::<ParseRequest>();
    let (response_tx, response_rx) = channel::<ParseResponse>();

    let worker_tx = response_tx.clone();
    let worker_options = options.clone();
    let spawned = thread::Builder::new()
      .name("inkdown-parse".to_string())
      .spawn(move || run_worker(&request_rx, &worker_tx, worker_options));

    let fallback = match spawned {
      Ok(_) => None,
      Err(e) => {
        log::warn!(
          "Failed to spawn parse worker, falling back to synchronous \
           parsing: {e}"
        );
        Some(MarkdownProcessor::new(options))
      },
    };

    Self {
      requests: request_tx,
      responses: response_rx,
      loopback: response_tx,
      fallback,
      generation: 0,
      newest_seen: 0,
    }
  }

  /// Whether parses run on the background thread.
  #[must_use]
  pub const fn is_background(&self) -> bool {
    self.fallback.is_none()
  }

  /// Submit source text for parsing. Returns the generation assigned to
  /// this request.
  pub fn submit(&mut self, source: String) -> u64 {
    self.generation += 1;
    let generation = self.generation;

    if let Some(processor) = &self.fallback {
      let result = render_recovering(processor, &source);
      let _ = self.loopback.send(ParseResponse {
        generation,
        result: Ok(result),
      });
      return generation;
    }

    if self.requests.send(ParseRequest { generation, source }).is_err() {
      // Worker thread is gone; report instead of silently dropping the
      // request.
      log::error!("Parse worker is unavailable");
      let _ = self.loopback.send(ParseResponse {
        generation,
        result: Err("parse worker unavailable".to_string()),
      });
    }

    generation
  }

  /// Collect the newest completed parse, if any.
  ///
  /// Stale responses (generation older than the newest already seen) are
  /// discarded, never returned.
  pub fn poll(&mut self) -> Option<ParseResponse> {
    let mut newest: Option<ParseResponse> = None;

    while let Ok(response) = self.responses.try_recv() {
      if response.generation > self.newest_seen {
        self.newest_seen = response.generation;
        newest = Some(response);
      } else {
        log::debug!(
          "Discarding stale parse response (generation {})",
          response.generation
        );
      }
    }

    newest
  }

  /// Block until the response for `generation` (or anything newer) arrives.
  ///
  /// Used by one-shot rendering paths where there is nothing else to do in
  /// the meantime.
  pub fn wait_for(&mut self, generation: u64) -> Option<ParseResponse> {
    if let Some(response) = self.poll() {
      if response.generation >= generation {
        return Some(response);
      }
    }

    while let Ok(response) = self.responses.recv() {
      if response.generation <= self.newest_seen {
        continue;
      }
      self.newest_seen = response.generation;
      if response.generation >= generation {
        return Some(response);
      }
    }

    None
  }
}

fn run_worker(
  requests: &Receiver<ParseRequest>,
  responses: &Sender<ParseResponse>,
  options: MarkdownOptions,
) {
  let processor = MarkdownProcessor::new(options);

  while let Ok(mut request) = requests.recv() {
    // Drain the queue; only the newest pending request matters.
    while let Ok(newer) = requests.try_recv() {
      request = newer;
    }

    let result = render_recovering(&processor, &request.source);
    let response = ParseResponse {
      generation: request.generation,
      result:     Ok(result),
    };
    if responses.send(response).is_err() {
      break;
    }
  }
}

/// Coalesces bursts of source-change notifications into one dispatch.
pub struct Debouncer {
  window:       Duration,
  last_change:  Option<Instant>,
  pending_text: Option<String>,
}

impl Debouncer {
  /// Default coalescing window for source changes.
  pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

  #[must_use]
  pub const fn new(window: Duration) -> Self {
    Self {
      window,
      last_change: None,
      pending_text: None,
    }
  }

  /// Record a source change. Overwrites any pending text and restarts the
  /// window.
  pub fn record(&mut self, source: String) {
    self.pending_text = Some(source);
    self.last_change = Some(Instant::now());
  }

  /// Take the pending text once the window has elapsed with no new change.
  pub fn take_ready(&mut self) -> Option<String> {
    if self
      .last_change
      .is_some_and(|changed| changed.elapsed() >= self.window)
    {
      self.last_change = None;
      return self.pending_text.take();
    }
    None
  }

  /// Whether a change is waiting for its window to elapse.
  #[must_use]
  pub const fn has_pending(&self) -> bool {
    self.pending_text.is_some()
  }
}

impl Default for Debouncer {
  fn default() -> Self {
    Self::new(Self::DEFAULT_WINDOW)
  }
}
