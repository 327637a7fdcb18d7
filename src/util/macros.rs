/**
  * Try to get the content of a result, returning a new error if there was one.
  * The original error is logged together with the new message.
  *
  * Params:
  *   $res: Result<T,E>
  *   $err: String or &str
  *
  * Returns: T or Err(String)
  */
#[macro_export]
macro_rules! try_result {
    ($res:expr, $err:expr) => {
        match $res {
            Ok(val) => val,
            Err(orig) => {
                let msg = format!("{} ({})", $err, orig.to_string());
                error!("{}", msg);
                return Err(msg);
            }
        }
    }
}

/**
  * Try to get the content of an option, returning an error if there is no content
  *
  * Params:
  *   $opt: Option<T>
  *   $err: String or &str
  *
  * Returns: T or Err(String)
  */
#[macro_export]
macro_rules! try_option {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(val) => val,
            None => {
                error!("{}", $err);
                return Err(String::from($err));
            }
        }
    }
}

/**
  * Create a result of a boolean value. If the bool is true, return the Ok value,
  * if it is false return an error created from the error message.
  *
  * Params:
  *   $cond: bool
  *   $ok: T
  *   $err: String or similar
  *
  * Returns Result<T,String>
  */
#[macro_export]
macro_rules! bool_result {
    ($cond:expr, $ok:expr, $err:expr) => {
        if $cond {
            Ok($ok)
        } else {
            error!("{}", $err);
            Err(String::from($err))
        }
    }
}

#[macro_export]
macro_rules! dry_run {
    ($output:expr) => {
        info!("DRY-RUN: {}", $output);
    }
}

#[macro_export]
macro_rules! log_error {
    ($result:expr) => {
        if let Err(err) = $result {
            error!("{}", err);
        }
    }
}
