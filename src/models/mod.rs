pub mod equipment;
pub mod exercise;
pub mod exercise_log;
pub mod from_row;
pub mod muscle;
pub mod pagination;
pub mod personal_record;
pub mod user;
pub mod validation;
pub mod workout;

pub use equipment::{CreateEquipment, Equipment, EquipmentChanges, NewEquipment, UpdateEquipment};
pub use exercise::{
    CreateExercise, Difficulty, Exercise, ExerciseCategory, ExerciseChanges, ExerciseFilter,
    ExerciseListQuery, ExerciseMuscle, ExerciseOrder, ExerciseWithRelations, NewExercise,
    UpdateExercise,
};
pub use exercise_log::{
    CreateExerciseLog, ExerciseLog, ExerciseLogQuery, ExerciseLogWithExercise, LoggedExercise,
    NewExerciseLog,
};
pub use from_row::FromSqliteRow;
pub use muscle::{CreateMuscle, Muscle, MuscleChanges, MuscleRole, NewMuscle, UpdateMuscle};
pub use pagination::{Page, PageQuery};
pub use personal_record::{
    PersonalRecord, PersonalRecordWithExercise, RecordCandidate, RecordOutcome, RecordType,
    SubmitPersonalRecord,
};
pub use user::{LoginCredentials, NewUser, RegisterUser, User};
pub use workout::{
    AddWorkoutExercise, CreateWorkout, CreateWorkoutSet, NewWorkout, NewWorkoutExercise, Targets,
    UpdateWorkout, UpdateWorkoutExercise, UpdateWorkoutSet, Workout, WorkoutChanges,
    WorkoutDetail, WorkoutExercise, WorkoutExerciseDetail, WorkoutSet,
};
