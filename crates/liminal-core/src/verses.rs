//! The verse pool
//!
//! Ordered pool of message lines used by the liminal table variant. Entries
//! are assigned by table index modulo the pool length, so the pool wrapping
//! around is expected: the repetition is part of the theme.

/// Thematic verses, in assignment order.
pub const VERSES: &[&str] = &[
    "You have entered the space between request and response.",
    "The packet departed long ago; its arrival is still being negotiated.",
    "Somewhere a socket holds its breath.",
    "This corridor has no doors, only timeouts.",
    "Your message echoes in a hallway of routers, each one asleep.",
    "The gateway remembers you, but not why you came.",
    "Between hop and hop there is a waiting room with no clock.",
    "A connection is a promise; this one is still deciding.",
    "The server is neither here nor there. Neither are you.",
    "Fluorescent light hums over an empty routing table.",
    "All queues drain eventually. This is not one of those times.",
    "The handshake completed, but nobody remembers shaking.",
    "Traffic passes through this place without stopping to look.",
    "Your request is the only guest in an infinite terminal.",
    "Signal sent, signal received, meaning still in transit.",
    "The cache is full of things nobody will ask for again.",
];
