//! WKNavigationDelegate that routes policy decisions to a [`RichEditor`].
//!
//! The class is registered once per process under a fixed name. Each
//! instance keeps a pointer to a heap-allocated [`NavigationContext`] in an
//! ivar; the owning [`NavigationDelegate`] clears the ivar before freeing
//! the context, so a late callback sees null and falls back to the
//! stateless policy.

use std::ffi::{c_void, CStr};

use block2::DynBlock;
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject, AnyProtocol, ClassBuilder, Sel};
use objc2::{msg_send, sel, ClassType, MainThreadMarker};
use objc2_foundation::{NSInteger, NSObject, NSURL};
use scribe_core::{
    NavigationKind, NavigationPolicy, NavigationRequest, RichEditor, WeakRichEditor,
};

const CONTEXT_IVAR: &CStr = c"_scribeNavContext";

// WKNavigationActionPolicy
const POLICY_CANCEL: NSInteger = 0;
const POLICY_ALLOW: NSInteger = 1;

// WKNavigationType
const NAVIGATION_TYPE_LINK_ACTIVATED: NSInteger = 0;

struct NavigationContext {
    editor: WeakRichEditor,
    callback_scheme: &'static str,
}

impl NavigationContext {
    fn decide(&self, request: &NavigationRequest<'_>) -> NavigationPolicy {
        if let Some(editor) = self.editor.upgrade() {
            return editor.decide_navigation(request);
        }
        // Editor gone: never load the signal URL and never follow links.
        if request.url.starts_with(self.callback_scheme)
            || request.kind == NavigationKind::LinkActivated
        {
            NavigationPolicy::Cancel
        } else {
            NavigationPolicy::Allow
        }
    }
}

/// Owned navigation delegate object plus the context it points at.
pub(crate) struct NavigationDelegate {
    object: Retained<AnyObject>,
    context: *mut NavigationContext,
}

impl NavigationDelegate {
    /// Allocate a delegate routing to `editor`.
    ///
    /// # Safety
    ///
    /// Must be called from the main thread.
    pub(crate) unsafe fn new(editor: &RichEditor, _mtm: MainThreadMarker) -> Self {
        let cls = navigation_delegate_class();

        let context = Box::into_raw(Box::new(NavigationContext {
            editor: editor.downgrade(),
            callback_scheme: editor.config().callback_scheme,
        }));

        // SAFETY: standard ObjC alloc pattern on a class we just built.
        let obj: *mut AnyObject = unsafe { msg_send![cls, alloc] };
        // SAFETY: init on a freshly allocated object.
        let obj: *mut AnyObject = unsafe { msg_send![obj, init] };
        assert!(!obj.is_null(), "alloc+init returned nil");

        let ctx_ivar = cls
            .instance_variable(CONTEXT_IVAR)
            .expect("context ivar must exist");

        // SAFETY: obj is a freshly init'd instance; no Retained/shared ref exists yet.
        unsafe {
            let ptr: *mut *mut c_void = ctx_ivar.load_ptr(&*obj);
            *ptr = context as *mut c_void;
        }

        // SAFETY: alloc+init returned a +1 retained, non-null object.
        let object = unsafe { Retained::from_raw(obj) }.unwrap();
        Self { object, context }
    }

    pub(crate) fn as_object(&self) -> &AnyObject {
        &self.object
    }
}

impl Drop for NavigationDelegate {
    fn drop(&mut self) {
        if let Some(ivar) = self.object.class().instance_variable(CONTEXT_IVAR) {
            // SAFETY: the ivar exists on this class; callbacks run on the
            // main thread, as does drop, so nothing reads it concurrently.
            unsafe { *ivar.load_ptr::<*mut c_void>(&self.object) = std::ptr::null_mut() };
        }
        // SAFETY: context came from Box::into_raw in new() and is no longer
        // reachable from the ObjC object.
        drop(unsafe { Box::from_raw(self.context) });
    }
}

/// Get or register the ScribeNavigationDelegate ObjC class.
fn navigation_delegate_class() -> &'static AnyClass {
    let c_name = c"ScribeNavigationDelegate";

    if let Some(existing) = AnyClass::get(c_name) {
        return existing;
    }

    let superclass = NSObject::class();
    let mut builder = match ClassBuilder::new(c_name, superclass) {
        Some(b) => b,
        None => {
            return AnyClass::get(c_name)
                .expect("class must exist after ClassBuilder::new returned None");
        }
    };

    builder.add_ivar::<*mut c_void>(CONTEXT_IVAR);

    if let Some(proto) = AnyProtocol::get(c"WKNavigationDelegate") {
        builder.add_protocol(proto);
    }

    // SAFETY: method signature matches the WKNavigationDelegate protocol.
    unsafe {
        builder.add_method(
            sel!(webView:decidePolicyForNavigationAction:decisionHandler:),
            decide_policy_for_navigation_action
                as unsafe extern "C-unwind" fn(
                    *mut AnyObject,
                    Sel,
                    *const AnyObject,
                    *const AnyObject,
                    *mut DynBlock<dyn Fn(NSInteger)>,
                ),
        );
    }

    builder.register()
}

/// `webView:decidePolicyForNavigationAction:decisionHandler:` implementation.
unsafe extern "C-unwind" fn decide_policy_for_navigation_action(
    this: *mut AnyObject,
    _cmd: Sel,
    _webview: *const AnyObject,
    action: *const AnyObject,
    decision_handler: *mut DynBlock<dyn Fn(NSInteger)>,
) {
    // SAFETY: WebKit provides a valid receiver pointer.
    let this: &AnyObject = unsafe { &*this };
    // SAFETY: WebKit provides a valid WKNavigationAction.
    let action: &AnyObject = unsafe { &*action };

    // SAFETY: action is a WKNavigationAction; request is never nil.
    let request: *const AnyObject = unsafe { msg_send![action, request] };
    // SAFETY: request is a valid NSURLRequest.
    let url_opt: Option<Retained<NSURL>> = unsafe { msg_send![request, URL] };
    let url = url_opt
        .and_then(|url| url.absoluteString())
        .map(|s| s.to_string())
        .unwrap_or_default();

    // SAFETY: navigationType is a plain NSInteger property.
    let navigation_type: NSInteger = unsafe { msg_send![action, navigationType] };
    let kind = if navigation_type == NAVIGATION_TYPE_LINK_ACTIVATED {
        NavigationKind::LinkActivated
    } else {
        NavigationKind::Other
    };

    let request = NavigationRequest::new(&url, kind);
    // SAFETY: this is an instance of the class built above.
    let policy = match unsafe { load_context(this) } {
        Some(context) => context.decide(&request),
        None => NavigationPolicy::Allow,
    };

    let raw_policy = match policy {
        NavigationPolicy::Allow => POLICY_ALLOW,
        NavigationPolicy::Cancel => POLICY_CANCEL,
    };
    // SAFETY: WebKit passes a valid decision handler and expects one call.
    unsafe { (*decision_handler).call((raw_policy,)) };
}

/// Read the context ivar.
///
/// # Safety
///
/// `this` must be an instance of the class built by `navigation_delegate_class`.
unsafe fn load_context(this: &AnyObject) -> Option<&NavigationContext> {
    let ivar = this.class().instance_variable(CONTEXT_IVAR)?;
    // SAFETY: the ivar is written in new() and cleared in drop().
    let raw: *mut c_void = unsafe { *ivar.load_ptr::<*mut c_void>(this) };
    if raw.is_null() {
        return None;
    }
    // SAFETY: non-null values point at a live NavigationContext.
    Some(unsafe { &*(raw as *const NavigationContext) })
}
