//! Ambient global declarations.
//!
//! The checker does not load `lib.d.ts`. Instead it knows the names the
//! default libraries (ES2023, DOM, and the Node globals most programs
//! expect) declare, and types every one of them as `any`. The tables are
//! built once and shared read-only across threads.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

static GLOBAL_VALUES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // ECMAScript
        "globalThis", "undefined", "NaN", "Infinity", "eval", "parseInt", "parseFloat",
        "isNaN", "isFinite", "decodeURI", "decodeURIComponent", "encodeURI",
        "encodeURIComponent", "escape", "unescape", "Object", "Function", "String",
        "Boolean", "Number", "BigInt", "Symbol", "Math", "Date", "RegExp", "Error",
        "EvalError", "RangeError", "ReferenceError", "SyntaxError", "TypeError",
        "URIError", "AggregateError", "JSON", "Array", "ArrayBuffer", "SharedArrayBuffer",
        "DataView", "Int8Array", "Uint8Array", "Uint8ClampedArray", "Int16Array",
        "Uint16Array", "Int32Array", "Uint32Array", "Float32Array", "Float64Array",
        "BigInt64Array", "BigUint64Array", "Map", "Set", "WeakMap", "WeakSet", "WeakRef",
        "FinalizationRegistry", "Promise", "Proxy", "Reflect", "Atomics", "Intl",
        // Host and DOM
        "console", "window", "self", "document", "navigator", "location", "history",
        "localStorage", "sessionStorage", "performance", "crypto", "fetch", "Request",
        "Response", "Headers", "URL", "URLSearchParams", "AbortController", "AbortSignal",
        "Blob", "File", "FileReader", "FormData", "TextEncoder", "TextDecoder",
        "WebSocket", "Worker", "MessageChannel", "MessagePort", "BroadcastChannel",
        "Event", "EventTarget", "CustomEvent", "MouseEvent", "KeyboardEvent",
        "MessageEvent", "ErrorEvent", "Element", "HTMLElement", "Node", "NodeList",
        "DOMParser", "DOMException", "MutationObserver", "IntersectionObserver",
        "ResizeObserver", "XMLHttpRequest", "Image", "Audio", "alert", "confirm",
        "prompt", "setTimeout", "clearTimeout", "setInterval", "clearInterval",
        "setImmediate", "clearImmediate", "requestAnimationFrame", "cancelAnimationFrame",
        "queueMicrotask", "structuredClone", "atob", "btoa", "addEventListener",
        "removeEventListener", "dispatchEvent", "getComputedStyle", "matchMedia",
        "name", "length", "close", "open", "print", "status", "origin", "top", "parent",
        "frames", "screen", "innerWidth", "innerHeight", "scrollTo", "scrollX", "scrollY",
        // Node
        "process", "Buffer", "require", "module", "exports", "__dirname", "__filename",
        "global",
    ]
    .into_iter()
    .collect()
});

static GLOBAL_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // Utility types
        "Partial", "Required", "Readonly", "Pick", "Omit", "Record", "Exclude", "Extract",
        "NonNullable", "Parameters", "ConstructorParameters", "ReturnType", "InstanceType",
        "ThisParameterType", "OmitThisParameter", "ThisType", "Awaited", "Uppercase",
        "Lowercase", "Capitalize", "Uncapitalize", "NoInfer", "PropertyKey",
        "PropertyDescriptor", "PropertyDescriptorMap", "TemplateStringsArray",
        // ECMAScript
        "Object", "Function", "CallableFunction", "NewableFunction", "String", "Boolean",
        "Number", "BigInt", "Symbol", "Date", "RegExp", "RegExpMatchArray",
        "RegExpExecArray", "Error", "EvalError", "RangeError", "ReferenceError",
        "SyntaxError", "TypeError", "URIError", "AggregateError", "ErrorConstructor",
        "JSON", "Math", "Array", "ReadonlyArray", "ArrayLike", "ConcatArray",
        "ArrayBuffer", "ArrayBufferLike", "ArrayBufferView", "SharedArrayBuffer",
        "DataView", "Int8Array", "Uint8Array", "Uint8ClampedArray", "Int16Array",
        "Uint16Array", "Int32Array", "Uint32Array", "Float32Array", "Float64Array",
        "BigInt64Array", "BigUint64Array", "Map", "ReadonlyMap", "Set", "ReadonlySet",
        "WeakMap", "WeakSet", "WeakRef", "WeakKey", "Promise", "PromiseLike",
        "PromiseConstructorLike", "PromiseSettledResult", "PromiseFulfilledResult",
        "PromiseRejectedResult", "Iterable", "Iterator", "IterableIterator",
        "IteratorResult", "IteratorYieldResult", "IteratorReturnResult", "AsyncIterable",
        "AsyncIterator", "AsyncIterableIterator", "Generator", "AsyncGenerator",
        "GeneratorFunction", "ProxyHandler", "TypedPropertyDescriptor", "ClassDecorator",
        "MethodDecorator", "PropertyDecorator", "ParameterDecorator", "ClassDecoratorContext",
        "ClassMethodDecoratorContext", "ClassFieldDecoratorContext",
        "ClassGetterDecoratorContext", "ClassSetterDecoratorContext",
        "ClassAccessorDecoratorContext", "DecoratorContext", "Intl", "Console",
        "IArguments",
        // Host and DOM
        "Window", "Document", "Navigator", "Location", "History", "Storage",
        "Performance", "Crypto", "Request", "RequestInit", "Response", "ResponseInit",
        "Headers", "HeadersInit", "BodyInit", "URL", "URLSearchParams", "AbortController",
        "AbortSignal", "Blob", "File", "FileReader", "FormData", "TextEncoder",
        "TextDecoder", "WebSocket", "Worker", "MessageChannel", "MessagePort", "Event",
        "EventTarget", "EventListener", "EventListenerOrEventListenerObject",
        "AddEventListenerOptions", "CustomEvent", "MouseEvent", "KeyboardEvent",
        "PointerEvent", "TouchEvent", "FocusEvent", "InputEvent", "MessageEvent",
        "ErrorEvent", "Element", "HTMLElement", "HTMLDivElement", "HTMLSpanElement",
        "HTMLInputElement", "HTMLButtonElement", "HTMLAnchorElement", "HTMLImageElement",
        "HTMLCanvasElement", "HTMLFormElement", "HTMLSelectElement", "HTMLTextAreaElement",
        "HTMLTableElement", "HTMLVideoElement", "HTMLAudioElement", "HTMLElementTagNameMap",
        "SVGElement", "Node", "NodeList", "NodeListOf", "HTMLCollection",
        "HTMLCollectionOf", "DocumentFragment", "ShadowRoot", "CSSStyleDeclaration",
        "DOMRect", "DOMException", "MutationObserver", "IntersectionObserver",
        "ResizeObserver", "XMLHttpRequest", "CanvasRenderingContext2D",
        "WebGLRenderingContext", "ReadableStream", "WritableStream", "TransformStream",
        // Node
        "NodeJS", "Buffer", "BufferEncoding",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` is a value declared by the default libraries.
pub fn is_global_value(name: &str) -> bool {
    GLOBAL_VALUES.contains(name)
}

/// Whether `name` is a type declared by the default libraries.
pub fn is_global_type(name: &str) -> bool {
    GLOBAL_TYPES.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_globals_are_known() {
        assert!(is_global_value("console"));
        assert!(is_global_value("undefined"));
        assert!(is_global_type("Promise"));
        assert!(is_global_type("Record"));
        assert!(!is_global_value("definitelyNotAGlobal"));
        assert!(!is_global_type("thing"));
    }
}
