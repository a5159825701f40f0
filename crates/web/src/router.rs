use crate::handler::RequestHandler;

use std::collections::HashMap;

use http::Method;
use tracing::warn;

/// Main router structure that routes requests by path and method.
///
/// Routes are stored in a segment trie. Each node holds its literal children,
/// at most one capture edge and the handlers registered for the terminal
/// methods. A literal child always wins over the capture edge.
pub struct Router {
    root: Node,
}

#[derive(Default)]
struct Node {
    literals: HashMap<String, Node>,
    capture: Option<Box<CaptureEdge>>,
    handlers: HashMap<Method, Box<dyn RequestHandler>>,
}

struct CaptureEdge {
    name: String,
    node: Node,
}

/// Result of matching a route, containing the handler and the captured segment
pub struct RouteMatch<'router, 'req> {
    handler: &'router dyn RequestHandler,
    capture: Option<&'req str>,
}

impl Router {
    /// Creates a new router builder
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Matches a method and path against the router's routes.
    ///
    /// Returns `None` when no node terminates at the path or when the node has
    /// no handler for the method. A single trailing slash is tolerated, except
    /// where a capture edge consumes the empty segment instead.
    pub fn at<'router, 'req>(&'router self, method: &Method, path: &'req str) -> Option<RouteMatch<'router, 'req>> {
        let mut node = &self.root;
        let mut capture = None;

        let mut segments = path.split('/').peekable();
        // a rooted path always yields a leading empty segment
        if segments.peek().is_some_and(|segment| segment.is_empty()) {
            segments.next();
        }

        while let Some(segment) = segments.next() {
            if let Some(next) = node.literals.get(segment) {
                node = next;
                continue;
            }
            if let Some(edge) = node.capture.as_deref() {
                capture = Some(segment);
                node = &edge.node;
                continue;
            }
            if segment.is_empty() && segments.peek().is_none() {
                break;
            }
            return None;
        }

        node.handlers.get(method).map(|handler| RouteMatch { handler: handler.as_ref(), capture })
    }
}

impl<'router, 'req> RouteMatch<'router, 'req> {
    /// Gets the matched request handler
    pub fn handler(&self) -> &'router dyn RequestHandler {
        self.handler
    }

    /// Gets the path segment consumed by the capture edge, if any
    pub fn capture(&self) -> Option<&'req str> {
        self.capture
    }
}

pub struct RouterBuilder {
    root: Node,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { root: Node::default() }
    }

    /// Registers a route pattern for the entry's method.
    ///
    /// Segments of the form `{name}` register a capture edge; all other
    /// segments are literals. Empty segments in the pattern are ignored.
    /// Registering the same pattern and method twice keeps the last handler.
    pub fn route(mut self, pattern: impl Into<String>, entry: RouteEntry) -> Self {
        let pattern = pattern.into();
        let mut node = &mut self.root;

        for segment in pattern.split('/').filter(|segment| !segment.is_empty()) {
            if let Some(name) = segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
                let edge = node
                    .capture
                    .get_or_insert_with(|| Box::new(CaptureEdge { name: name.to_string(), node: Node::default() }));
                if edge.name != name {
                    warn!("capture '{{{}}}' in '{}' reuses existing edge '{{{}}}'", name, pattern, edge.name);
                }
                node = &mut edge.node;
            } else {
                node = node.literals.entry(segment.to_string()).or_default();
            }
        }

        let RouteEntry { method, handler } = entry;
        if node.handlers.insert(method.clone(), handler).is_some() {
            warn!("route '{}' already has a {} handler, replacing", pattern, method);
        }
        self
    }

    /// Builds the router from the accumulated routes
    pub fn build(self) -> Router {
        Router { root: self.root }
    }
}

pub struct RouteEntry {
    method: Method,
    handler: Box<dyn RequestHandler>,
}

macro_rules! method_route_entry {
    ($fn_name:ident, $method:ident) => {
        pub fn $fn_name<H: RequestHandler + 'static>(handler: H) -> RouteEntry {
            RouteEntry { method: Method::$method, handler: Box::new(handler) }
        }
    };
}

method_route_entry!(get, GET);
method_route_entry!(post, POST);
method_route_entry!(put, PUT);
method_route_entry!(delete, DELETE);
method_route_entry!(head, HEAD);
method_route_entry!(options, OPTIONS);
method_route_entry!(connect, CONNECT);
method_route_entry!(patch, PATCH);
method_route_entry!(trace, TRACE);
